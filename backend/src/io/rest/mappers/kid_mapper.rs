use crate::domain::models::kid::Kid as DomainKid;
use shared::{Kid as SharedKid, KidListResponse, KidResponse};

/// Mapper from domain kids to shared Kid DTOs
pub struct KidMapper;

impl KidMapper {
    pub fn to_dto(domain: DomainKid) -> SharedKid {
        SharedKid {
            id: domain.id,
            name: domain.name,
            color: domain.color,
            points: domain.points,
            current_list: domain.current_list,
            active: domain.active,
        }
    }

    pub fn to_kid_list_dto(kids: Vec<DomainKid>) -> KidListResponse {
        KidListResponse {
            kids: kids.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_kid_response(domain: DomainKid, message: &str) -> KidResponse {
        KidResponse {
            kid: Self::to_dto(domain),
            success_message: message.to_string(),
        }
    }
}
