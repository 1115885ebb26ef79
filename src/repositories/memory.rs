//! In-memory repositories for tests.
//!
//! Both repositories share one `MemoryStore` so that credits see the
//! customers table the way the Postgres foreign key does: credits are loaded
//! with their owner and removed along with it.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        credit::{Credit, NewCredit},
        customer::Customer,
    },
    repositories::{CreditRepository, CustomerRepository},
};

#[derive(Debug, Default)]
struct Tables {
    customers: BTreeMap<i64, Customer>,
    credits: BTreeMap<i64, Credit>,
    last_customer_id: i64,
    last_credit_id: i64,
    customer_deletes: usize,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn customers(&self) -> MemoryCustomerRepository {
        MemoryCustomerRepository {
            store: self.clone(),
        }
    }

    pub fn credits(&self) -> MemoryCreditRepository {
        MemoryCreditRepository {
            store: self.clone(),
        }
    }

    pub async fn customer_count(&self) -> usize {
        self.tables.read().await.customers.len()
    }

    pub async fn credit_count(&self) -> usize {
        self.tables.read().await.credits.len()
    }

    /// Number of delete calls that reached the store.
    pub async fn customer_deletes(&self) -> usize {
        self.tables.read().await.customer_deletes
    }
}

#[derive(Debug, Clone)]
pub struct MemoryCustomerRepository {
    store: MemoryStore,
}

#[async_trait]
impl CustomerRepository for MemoryCustomerRepository {
    async fn save(&self, customer: Customer) -> Result<Customer, AppError> {
        let mut tables = self.store.tables.write().await;

        let duplicate = tables.customers.values().any(|existing| {
            existing.id != customer.id
                && (existing.cpf == customer.cpf || existing.email == customer.email)
        });
        if duplicate {
            return Err(AppError::Conflict("Duplicate value".to_string()));
        }

        let id = match customer.id {
            Some(id) if tables.customers.contains_key(&id) => id,
            Some(id) => return Err(AppError::NotFound(format!("Id {id} not found"))),
            None => {
                tables.last_customer_id += 1;
                tables.last_customer_id
            }
        };

        let stored = Customer {
            id: Some(id),
            ..customer
        };
        tables.customers.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, AppError> {
        Ok(self.store.tables.read().await.customers.get(&id).cloned())
    }

    async fn delete(&self, customer: &Customer) -> Result<(), AppError> {
        let mut tables = self.store.tables.write().await;
        tables.customer_deletes += 1;

        if let Some(id) = customer.id {
            tables.customers.remove(&id);
            tables.credits.retain(|_, credit| credit.customer_id != id);
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct MemoryCreditRepository {
    store: MemoryStore,
}

impl MemoryCreditRepository {
    fn with_owner(tables: &Tables, credit: &Credit) -> Credit {
        Credit {
            customer: tables.customers.get(&credit.customer_id).cloned(),
            ..credit.clone()
        }
    }
}

#[async_trait]
impl CreditRepository for MemoryCreditRepository {
    async fn save(&self, credit: &NewCredit) -> Result<Credit, AppError> {
        let mut tables = self.store.tables.write().await;

        if !tables.customers.contains_key(&credit.customer_id) {
            return Err(AppError::NotFound(format!(
                "Id {} not found",
                credit.customer_id
            )));
        }
        if tables
            .credits
            .values()
            .any(|existing| existing.credit_code == credit.credit_code)
        {
            return Err(AppError::Conflict("Duplicate value".to_string()));
        }

        tables.last_credit_id += 1;
        let stored = Credit {
            id: tables.last_credit_id,
            credit_code: credit.credit_code,
            credit_value: credit.credit_value,
            day_first_installment: credit.day_first_installment,
            number_of_installments: credit.number_of_installments,
            status: credit.status,
            customer_id: credit.customer_id,
            customer: None,
        };
        tables.credits.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_all_by_customer_id(&self, customer_id: i64) -> Result<Vec<Credit>, AppError> {
        let tables = self.store.tables.read().await;
        Ok(tables
            .credits
            .values()
            .filter(|credit| credit.customer_id == customer_id)
            .map(|credit| Self::with_owner(&tables, credit))
            .collect())
    }

    async fn find_by_credit_code(&self, credit_code: Uuid) -> Result<Option<Credit>, AppError> {
        let tables = self.store.tables.read().await;
        Ok(tables
            .credits
            .values()
            .find(|credit| credit.credit_code == credit_code)
            .map(|credit| Self::with_owner(&tables, credit)))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;
    use crate::models::customer::fixtures;

    fn new_credit(customer_id: i64) -> NewCredit {
        NewCredit::new(
            Decimal::new(10000, 1),
            NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            3,
            customer_id,
        )
    }

    #[tokio::test]
    async fn credit_for_missing_customer_is_not_found() {
        let store = MemoryStore::new();

        let result = store.credits().save(&new_credit(42)).await;

        assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == "Id 42 not found"));
        assert_eq!(store.credit_count().await, 0);
    }

    #[tokio::test]
    async fn deleting_customer_cascades_to_credits() {
        let store = MemoryStore::new();
        let customer = store.customers().save(fixtures::customer()).await.unwrap();
        let id = customer.id.unwrap();
        store.credits().save(&new_credit(id)).await.unwrap();

        store.customers().delete(&customer).await.unwrap();

        assert_eq!(store.credit_count().await, 0);
        assert!(store.credits().find_all_by_customer_id(id).await.unwrap().is_empty());
    }
}
