//! Customer operations.

use wefield_domain::customer::{Customer, HomeStatus};
use wefield_domain::error::{FieldServiceError, ValidationError};
use wefield_domain::id::CustomerId;

use super::FieldServiceStore;
use crate::ports::DocumentStore;

impl<S: DocumentStore> FieldServiceStore<S> {
    /// Add a new customer and persist.
    ///
    /// # Errors
    ///
    /// Returns [`FieldServiceError::Validation`] if the name is blank or the
    /// id is already taken, or a storage error from the backend.
    #[tracing::instrument(skip(self, customer), fields(customer_name = %customer.name))]
    pub fn create_customer(&mut self, customer: Customer) -> Result<Customer, FieldServiceError> {
        customer.validate()?;
        self.transact(|snapshot| {
            if snapshot.customer(&customer.id).is_some() {
                return Err(ValidationError::DuplicateId {
                    entity: "Customer",
                    id: customer.id.to_string(),
                }
                .into());
            }
            snapshot.customers.push(customer.clone());
            Ok(customer)
        })
    }

    /// Update the on-site status and notes of a customer.
    ///
    /// # Errors
    ///
    /// Returns [`FieldServiceError::NotFound`] when no customer with `id`
    /// exists, or a storage error from the backend.
    #[tracing::instrument(skip(self, notes))]
    pub fn update_customer(
        &mut self,
        id: &CustomerId,
        home_status: HomeStatus,
        notes: Option<String>,
    ) -> Result<Customer, FieldServiceError> {
        self.transact(|snapshot| {
            let customer = snapshot
                .customer_mut(id)
                .ok_or_else(|| FieldServiceError::not_found("Customer", id))?;
            customer.home_status = home_status;
            customer.notes = notes.filter(|n| !n.is_empty());
            Ok(customer.clone())
        })
    }

    /// Look up a customer by id.
    ///
    /// # Errors
    ///
    /// Returns [`FieldServiceError::NotFound`] when no customer with `id` exists.
    pub fn customer(&self, id: &CustomerId) -> Result<&Customer, FieldServiceError> {
        self.snapshot
            .customer(id)
            .ok_or_else(|| FieldServiceError::not_found("Customer", id))
    }

    /// All customers, in creation order.
    #[must_use]
    pub fn customers(&self) -> &[Customer] {
        &self.snapshot.customers
    }
}

#[cfg(test)]
mod tests {
    use crate::store::tests::empty_store;
    use wefield_domain::customer::{Customer, HomeStatus};
    use wefield_domain::error::{FieldServiceError, ValidationError};
    use wefield_domain::id::CustomerId;

    fn acme() -> Customer {
        Customer::builder()
            .name("Acme")
            .address("1 Main St")
            .build()
            .unwrap()
    }

    #[test]
    fn should_create_and_persist_customer() {
        let mut store = empty_store();
        let created = store.create_customer(acme()).unwrap();

        assert_eq!(store.customer(&created.id).unwrap().name, "Acme");
        assert_eq!(store.customers().len(), 1);
        assert_eq!(store.storage().write_count(), 1);
    }

    #[test]
    fn should_reject_blank_name_without_persisting() {
        let mut store = empty_store();
        let mut customer = acme();
        customer.name = " ".to_string();

        let result = store.create_customer(customer);
        assert!(matches!(
            result,
            Err(FieldServiceError::Validation(ValidationError::MissingField { .. }))
        ));
        assert!(store.customers().is_empty());
        assert_eq!(store.storage().write_count(), 0);
    }

    #[test]
    fn should_reject_reused_id() {
        let mut store = empty_store();
        let customer = acme();
        store.create_customer(customer.clone()).unwrap();

        let result = store.create_customer(customer);
        assert!(matches!(
            result,
            Err(FieldServiceError::Validation(ValidationError::DuplicateId { .. }))
        ));
        assert_eq!(store.customers().len(), 1);
    }

    #[test]
    fn should_update_home_status_and_notes() {
        let mut store = empty_store();
        let created = store.create_customer(acme()).unwrap();

        let updated = store
            .update_customer(&created.id, HomeStatus::Home, Some("gate code 1234".to_string()))
            .unwrap();
        assert_eq!(updated.home_status, HomeStatus::Home);
        assert_eq!(
            store.customer(&created.id).unwrap().notes.as_deref(),
            Some("gate code 1234")
        );
    }

    #[test]
    fn should_return_not_found_when_updating_unknown_customer() {
        let mut store = empty_store();
        let result = store.update_customer(&CustomerId::new(), HomeStatus::Home, None);
        assert!(matches!(result, Err(FieldServiceError::NotFound(_))));
    }
}
