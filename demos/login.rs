//! Example: Log in, fetch the current user, walk the user listing.
//!
//! Run with: cargo run --example login
//!
//! Reads `ICHECK_*` configuration and `ICHECK_TEST_USERNAME` /
//! `ICHECK_TEST_PASSWORD` from the environment or a `.env` file.

use icheck_api_client::resources::{LoginParams, UserListParams};
use icheck_api_client::{IcheckClient, IcheckError, ListParams};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    let filter = EnvFilter::from_default_env().add_directive("icheck_api_client=info".parse()?);
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let (username, password) = match (
        std::env::var("ICHECK_TEST_USERNAME"),
        std::env::var("ICHECK_TEST_PASSWORD"),
    ) {
        (Ok(u), Ok(p)) => (u, p),
        _ => {
            println!("Set ICHECK_TEST_USERNAME and ICHECK_TEST_PASSWORD to run this example.");
            return Ok(());
        }
    };

    let client = IcheckClient::from_env()?;

    let token = match client
        .account()
        .login(&LoginParams::new(username, password))
        .await
    {
        Ok(token) => token,
        Err(IcheckError::BadRequest(err)) => {
            println!("Login rejected: {err}");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };
    println!("Token valid for {}s", token.ttl);

    let params = token.to_params();
    let me = client.account().me(&params).await?;
    println!("Logged in as {} ({})", me.name, me.icheck_id);

    let list = UserListParams {
        list: ListParams {
            params: params.clone(),
            ..ListParams::new().limit(20)
        },
        ..UserListParams::default()
    };
    let mut users = client.users().list_iter(list);
    let mut count = 0;
    while let Some(user) = users.next().await? {
        count += 1;
        if count <= 5 {
            println!("  {}", user.icheck_id);
        }
    }
    println!("{count} users in total");

    client.account().logout(&params).await?;
    Ok(())
}
