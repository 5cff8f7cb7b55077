//! Logs in with credentials and prints the current user.
//!
//! Run with: cargo run --example login
//!
//! Requires .env file with:
//! - SWAPI_URL
//! - SWAPI_CLIENT_ID
//! - SWAPI_AUTH_TOKEN
//! - SWAPI_LOGIN
//! - SWAPI_PASSWORD

use std::env;

use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::SimpleLogger;
use swapi_lib::SwapiClient;
use swapi_lib::auth::Credentials;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    let _ = SimpleLogger::init(LevelFilter::Debug, Config::default());

    let url = env::var("SWAPI_URL").expect("SWAPI_URL not set");
    let client_id = env::var("SWAPI_CLIENT_ID").expect("SWAPI_CLIENT_ID not set");
    let auth_token = env::var("SWAPI_AUTH_TOKEN").expect("SWAPI_AUTH_TOKEN not set");
    let login = env::var("SWAPI_LOGIN").expect("SWAPI_LOGIN not set");
    let password = env::var("SWAPI_PASSWORD").expect("SWAPI_PASSWORD not set");

    let client = SwapiClient::builder().url(url).build()?;

    println!("Logging in...\n");

    let credentials = Credentials::new(client_id, auth_token, login, password);
    client.auth().login(&credentials).await?;

    println!("Login successful!");

    let me = client.auth().verify_token().await?;
    println!("Current user: {}", serde_json::to_string_pretty(&me)?);

    Ok(())
}
