//! PostgreSQL repositories built on the shared `DbPool`.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        credit::{Credit, NewCredit},
        customer::Customer,
    },
    repositories::{CreditRepository, CustomerRepository},
};

const CUSTOMER_COLUMNS: &str =
    "id, first_name, last_name, cpf, email, password, income, zip_code, street";

const CREDIT_COLUMNS: &str = "id, credit_code, credit_value, day_first_installment, \
     number_of_installments, status, customer_id";

#[derive(Clone)]
pub struct PgCustomerRepository {
    pool: DbPool,
}

impl PgCustomerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn save(&self, customer: Customer) -> Result<Customer, AppError> {
        let Some(id) = customer.id else {
            return sqlx::query_as::<_, Customer>(&format!(
                r#"
                INSERT INTO customers (first_name, last_name, cpf, email, password, income, zip_code, street)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING {CUSTOMER_COLUMNS}
                "#
            ))
            .bind(customer.first_name)
            .bind(customer.last_name)
            .bind(customer.cpf)
            .bind(customer.email)
            .bind(customer.password)
            .bind(customer.income)
            .bind(customer.address.zip_code)
            .bind(customer.address.street)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from_write_error);
        };

        sqlx::query_as::<_, Customer>(&format!(
            r#"
            UPDATE customers
            SET first_name = $2,
                last_name = $3,
                cpf = $4,
                email = $5,
                password = $6,
                income = $7,
                zip_code = $8,
                street = $9
            WHERE id = $1
            RETURNING {CUSTOMER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(customer.first_name)
        .bind(customer.last_name)
        .bind(customer.cpf)
        .bind(customer.email)
        .bind(customer.password)
        .bind(customer.income)
        .bind(customer.address.zip_code)
        .bind(customer.address.street)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from_write_error)?
        // Row vanished between lookup and update
        .ok_or_else(|| AppError::NotFound(format!("Id {id} not found")))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    async fn delete(&self, customer: &Customer) -> Result<(), AppError> {
        // Credits go with the customer through ON DELETE CASCADE
        sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(customer.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[derive(Clone)]
pub struct PgCreditRepository {
    pool: DbPool,
}

impl PgCreditRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn load_customer(&self, customer_id: i64) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1"
        ))
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }
}

#[async_trait]
impl CreditRepository for PgCreditRepository {
    async fn save(&self, credit: &NewCredit) -> Result<Credit, AppError> {
        let stored = sqlx::query_as::<_, Credit>(&format!(
            r#"
            INSERT INTO credits (
                credit_code,
                credit_value,
                day_first_installment,
                number_of_installments,
                status,
                customer_id
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {CREDIT_COLUMNS}
            "#
        ))
        .bind(credit.credit_code)
        .bind(credit.credit_value)
        .bind(credit.day_first_installment)
        .bind(credit.number_of_installments)
        .bind(credit.status)
        .bind(credit.customer_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::from_owned_write_error(error, credit.customer_id))?;

        Ok(stored)
    }

    async fn find_all_by_customer_id(&self, customer_id: i64) -> Result<Vec<Credit>, AppError> {
        let credits = sqlx::query_as::<_, Credit>(&format!(
            "SELECT {CREDIT_COLUMNS} FROM credits WHERE customer_id = $1 ORDER BY id"
        ))
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        if credits.is_empty() {
            return Ok(credits);
        }

        // All rows share one owner, so it is loaded once
        let customer = self.load_customer(customer_id).await?;
        Ok(credits
            .into_iter()
            .map(|credit| Credit {
                customer: customer.clone(),
                ..credit
            })
            .collect())
    }

    async fn find_by_credit_code(&self, credit_code: Uuid) -> Result<Option<Credit>, AppError> {
        let credit = sqlx::query_as::<_, Credit>(&format!(
            "SELECT {CREDIT_COLUMNS} FROM credits WHERE credit_code = $1"
        ))
        .bind(credit_code)
        .fetch_optional(&self.pool)
        .await?;

        let Some(credit) = credit else {
            return Ok(None);
        };

        let customer = self.load_customer(credit.customer_id).await?;
        Ok(Some(Credit { customer, ..credit }))
    }
}

/// Run against a live database with `DATABASE_URL` set:
/// `cargo test -- --ignored`. Each test gets a fresh migrated database.
#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use sqlx::PgPool;

    use super::*;
    use crate::models::{credit::CreditStatus, customer::fixtures};

    fn new_credit(customer_id: i64) -> NewCredit {
        NewCredit::new(
            Decimal::new(10000, 1),
            NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            3,
            customer_id,
        )
    }

    async fn saved_customer(pool: &PgPool) -> Customer {
        PgCustomerRepository::new(pool.clone())
            .save(fixtures::customer())
            .await
            .unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires PostgreSQL instance"]
    async fn customer_round_trips_with_address(pool: PgPool) {
        let repository = PgCustomerRepository::new(pool.clone());
        let saved = saved_customer(&pool).await;

        let found = repository.find_by_id(saved.id.unwrap()).await.unwrap();

        assert_eq!(found, Some(saved));
        assert_eq!(found.unwrap().address.street, "Rua Floriano Peixoto");
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires PostgreSQL instance"]
    async fn save_with_id_updates_the_row(pool: PgPool) {
        let repository = PgCustomerRepository::new(pool.clone());
        let saved = saved_customer(&pool).await;

        let updated = repository
            .save(Customer {
                first_name: "Ana".to_string(),
                ..saved.clone()
            })
            .await
            .unwrap();

        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.first_name, "Ana");

        let missing = repository
            .save(Customer {
                id: Some(999),
                ..saved
            })
            .await;
        assert!(matches!(missing, Err(AppError::NotFound(msg)) if msg == "Id 999 not found"));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires PostgreSQL instance"]
    async fn duplicate_cpf_is_a_conflict(pool: PgPool) {
        let repository = PgCustomerRepository::new(pool.clone());
        saved_customer(&pool).await;

        let result = repository
            .save(Customer {
                email: "other@email.com".to_string(),
                ..fixtures::customer()
            })
            .await;

        assert!(matches!(
            result,
            Err(AppError::Conflict(msg)) if msg == "Duplicate value violates customers_cpf_key"
        ));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires PostgreSQL instance"]
    async fn credits_list_in_insertion_order_with_owner(pool: PgPool) {
        let repository = PgCreditRepository::new(pool.clone());
        let customer = saved_customer(&pool).await;
        let customer_id = customer.id.unwrap();

        let first = repository.save(&new_credit(customer_id)).await.unwrap();
        let second = repository.save(&new_credit(customer_id)).await.unwrap();

        let credits = repository.find_all_by_customer_id(customer_id).await.unwrap();
        let codes: Vec<Uuid> = credits.iter().map(|credit| credit.credit_code).collect();

        assert_eq!(codes, vec![first.credit_code, second.credit_code]);
        assert!(credits.iter().all(|credit| credit.status == CreditStatus::InProgress));
        assert!(credits.iter().all(|credit| credit.customer.as_ref() == Some(&customer)));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires PostgreSQL instance"]
    async fn find_by_credit_code_loads_owner(pool: PgPool) {
        let repository = PgCreditRepository::new(pool.clone());
        let customer = saved_customer(&pool).await;
        let stored = repository.save(&new_credit(customer.id.unwrap())).await.unwrap();

        let found = repository
            .find_by_credit_code(stored.credit_code)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.credit_value, Decimal::new(10000, 1));
        assert_eq!(found.number_of_installments, 3);
        assert_eq!(found.customer, Some(customer));
        assert!(repository.find_by_credit_code(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires PostgreSQL instance"]
    async fn credit_for_missing_customer_is_not_found(pool: PgPool) {
        let repository = PgCreditRepository::new(pool);

        let result = repository.save(&new_credit(999)).await;

        assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == "Id 999 not found"));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "Requires PostgreSQL instance"]
    async fn deleting_customer_removes_credits(pool: PgPool) {
        let customers = PgCustomerRepository::new(pool.clone());
        let credits = PgCreditRepository::new(pool.clone());
        let customer = saved_customer(&pool).await;
        let customer_id = customer.id.unwrap();
        credits.save(&new_credit(customer_id)).await.unwrap();

        customers.delete(&customer).await.unwrap();

        assert!(customers.find_by_id(customer_id).await.unwrap().is_none());
        assert!(credits.find_all_by_customer_id(customer_id).await.unwrap().is_empty());
    }
}
