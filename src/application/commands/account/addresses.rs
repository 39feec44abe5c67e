use super::AccountCommandService;
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AddressDto, AuthenticatedUser},
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{Address, AddressId, AddressKind, NewAddress, PostalAddress},
};

/// Full set of address fields, used for both create and replace.
pub struct AddressCommand {
    pub address_type: AddressKind,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: Option<String>,
    pub country: String,
}

impl AddressCommand {
    fn into_postal(self) -> ApplicationResult<PostalAddress> {
        Ok(PostalAddress::new(
            self.address_type,
            self.street,
            self.city,
            self.state,
            self.postal_code,
            self.country,
        )?)
    }
}

impl AccountCommandService {
    pub async fn add_address(
        &self,
        actor: &AuthenticatedUser,
        command: AddressCommand,
    ) -> ApplicationResult<AddressDto> {
        ensure_capability(actor, "account", "manage")?;

        let address = self
            .address_repo
            .insert(NewAddress {
                user_id: actor.id,
                postal: command.into_postal()?,
                created_at: self.clock.now(),
            })
            .await?;
        Ok(address.into())
    }

    pub async fn update_address(
        &self,
        actor: &AuthenticatedUser,
        address_id: i64,
        command: AddressCommand,
    ) -> ApplicationResult<AddressDto> {
        ensure_capability(actor, "account", "manage")?;

        let address = self.owned_address(actor, address_id).await?;
        let postal = command.into_postal()?;
        let updated = self
            .address_repo
            .update(address.id, postal, self.clock.now())
            .await?;
        Ok(updated.into())
    }

    pub async fn delete_address(
        &self,
        actor: &AuthenticatedUser,
        address_id: i64,
    ) -> ApplicationResult<()> {
        ensure_capability(actor, "account", "manage")?;

        let address = self.owned_address(actor, address_id).await?;
        self.address_repo.delete(address.id).await?;
        Ok(())
    }

    async fn owned_address(
        &self,
        actor: &AuthenticatedUser,
        address_id: i64,
    ) -> ApplicationResult<Address> {
        let id = AddressId::new(address_id)?;
        let address = self
            .address_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("address not found"))?;
        if !address.is_owned_by(actor.id) {
            return Err(ApplicationError::forbidden("address belongs to another user"));
        }
        Ok(address)
    }
}
