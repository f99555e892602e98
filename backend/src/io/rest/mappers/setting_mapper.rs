use crate::domain::models::setting::Setting as DomainSetting;
use crate::storage::format_timestamp;
use shared::{Setting as SharedSetting, SettingListResponse};

pub struct SettingMapper;

impl SettingMapper {
    pub fn to_dto(domain: DomainSetting) -> SharedSetting {
        SharedSetting {
            key: domain.key,
            value: domain.value,
            created_at: format_timestamp(domain.created_at),
            updated_at: format_timestamp(domain.updated_at),
        }
    }

    pub fn to_setting_list_dto(settings: Vec<DomainSetting>) -> SettingListResponse {
        SettingListResponse {
            settings: settings.into_iter().map(Self::to_dto).collect(),
        }
    }
}
