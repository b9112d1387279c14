use icheck_api_client::IcheckClient;
use icheck_api_client::backend::{Environment, HttpBackend};
use icheck_api_client::resources::{LocationListParams, LoginParams};

fn live_tests_enabled() -> bool {
    std::env::var("ICHECK_LIVE_TESTS").ok().as_deref() == Some("1")
}

#[tokio::test]
#[ignore]
async fn live_sandbox_locations_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }

    let backend = HttpBackend::builder()
        .environment(Environment::Sandbox)
        .build();
    let client = IcheckClient::with_backend(backend);

    let cities = client.locations().list(&LocationListParams::new()).await?;
    assert!(!cities.is_empty());

    Ok(())
}

#[tokio::test]
#[ignore]
async fn live_account_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }

    let (username, password) = match (
        std::env::var("ICHECK_TEST_USERNAME"),
        std::env::var("ICHECK_TEST_PASSWORD"),
    ) {
        (Ok(u), Ok(p)) => (u, p),
        _ => return Ok(()),
    };
    let client = IcheckClient::from_env()?;

    let token = client
        .account()
        .login(&LoginParams::new(username, password))
        .await?;
    assert!(!token.id.is_empty());

    let me = client.account().me(&token.to_params()).await?;
    assert!(!me.icheck_id.is_empty());

    client.account().logout(&token.to_params()).await?;

    Ok(())
}
