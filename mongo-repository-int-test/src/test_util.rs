use futures::FutureExt;
use mongo_repository::errors::RepositoryResult;
use mongo_repository::mongodb::Client;
use mongo_repository::repository::{MongoEntity, ObjectRepository, RepositoryFactory};
use mongo_repository::repository_builder::RepositoryBuilder;
use mongo_repository::repository_config::RepositoryConfig;
use std::env;
use std::future::Future;
use std::panic::AssertUnwindSafe;

/// Environment variable holding the connection string of the test server.
pub const MONGODB_URI: &str = "MONGODB_URI";

/// Returns the test server connection string, if one is configured.
pub fn mongodb_uri() -> Option<String> {
    env::var(MONGODB_URI).ok().filter(|uri| !uri.trim().is_empty())
}

/// Runs a test against the server named by `MONGODB_URI`.
///
/// `after` always runs once `before` succeeded, even if the test fails or
/// panics. Server tests are marked `#[ignore]` and run with `cargo test -- --ignored`;
/// running one without `MONGODB_URI` fails instead of passing vacuously.
pub async fn run_test<B, BF, T, TF, A, AF>(before: B, test: T, after: A)
where
    B: FnOnce() -> BF,
    BF: Future<Output = RepositoryResult<TestContext>>,
    T: FnOnce(TestContext) -> TF,
    TF: Future<Output = RepositoryResult<()>>,
    A: FnOnce(TestContext) -> AF,
    AF: Future<Output = RepositoryResult<()>>,
{
    if mongodb_uri().is_none() {
        panic!("{} must name a MongoDB server to run integration tests", MONGODB_URI);
    }

    let ctx = match before().await {
        Ok(ctx) => ctx,
        Err(e) => panic!("Before run failed: {:?}", e),
    };

    let result = AssertUnwindSafe(test(ctx.clone())).catch_unwind().await;
    let after_result = after(ctx).await;

    match result {
        Ok(Ok(())) => {
            if let Err(e) = after_result {
                panic!("After run failed: {:?}", e);
            }
        }
        Ok(Err(e)) => panic!("Test failed: {:?}", e),
        Err(panic_err) => std::panic::resume_unwind(panic_err),
    }
}

/// A connection to the test server and a database private to one test.
#[derive(Clone)]
pub struct TestContext {
    uri: String,
    database_name: String,
    client: Client,
}

impl TestContext {
    pub fn new(uri: String, database_name: String, client: Client) -> Self {
        Self {
            uri,
            database_name,
            client,
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    pub fn client(&self) -> Client {
        self.client.clone()
    }

    /// A builder preconfigured with the test server and database.
    pub fn builder(&self) -> RepositoryBuilder {
        RepositoryBuilder::new()
            .connection_string(&self.uri)
            .database_name(&self.database_name)
    }

    pub fn config(&self) -> RepositoryResult<RepositoryConfig> {
        let mut config = RepositoryConfig::new();
        config.set_connection_string(&self.uri)?;
        config.set_database_name(&self.database_name)?;
        Ok(config)
    }

    /// A factory sharing this context's client.
    pub fn factory(&self) -> RepositoryResult<RepositoryFactory> {
        Ok(RepositoryFactory::from_client(
            self.client.clone(),
            self.client.database(&self.database_name),
            self.config()?,
        ))
    }

    pub async fn repository<T: MongoEntity>(&self) -> RepositoryResult<ObjectRepository<T>> {
        self.factory()?.repository::<T>().await
    }
}

pub fn random_database_name() -> String {
    format!("test_{}", uuid::Uuid::new_v4().simple())
}

pub async fn create_test_context() -> RepositoryResult<TestContext> {
    let uri = mongodb_uri().unwrap_or_default();
    let client = Client::with_uri_str(&uri).await?;
    Ok(TestContext::new(uri, random_database_name(), client))
}

/// Drops the test database.
pub async fn cleanup(ctx: TestContext) -> RepositoryResult<()> {
    ctx.client.database(&ctx.database_name).drop().await?;
    Ok(())
}
