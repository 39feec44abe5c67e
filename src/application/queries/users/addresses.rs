use super::UserQueryService;
use crate::{
    application::{
        dto::{AddressDto, AuthenticatedUser},
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::AddressId,
};

impl UserQueryService {
    pub async fn list_addresses(
        &self,
        actor: &AuthenticatedUser,
    ) -> ApplicationResult<Vec<AddressDto>> {
        let addresses = self.address_repo.list_for_user(actor.id).await?;
        Ok(addresses.into_iter().map(Into::into).collect())
    }

    pub async fn get_address(
        &self,
        actor: &AuthenticatedUser,
        address_id: i64,
    ) -> ApplicationResult<AddressDto> {
        let address = self
            .address_repo
            .find_by_id(AddressId::new(address_id)?)
            .await?
            .ok_or_else(|| ApplicationError::not_found("address not found"))?;

        if !address.is_owned_by(actor.id) {
            return Err(ApplicationError::forbidden("address belongs to another user"));
        }
        Ok(address.into())
    }
}
