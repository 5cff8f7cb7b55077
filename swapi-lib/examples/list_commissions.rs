//! Lists open commissions page by page.
//!
//! Run with: cargo run --example list_commissions
//!
//! Requires .env file with:
//! - SWAPI_URL
//! - SWAPI_CLIENT_ID
//! - SWAPI_AUTH_TOKEN
//! - SWAPI_LOGIN
//! - SWAPI_PASSWORD
//!
//! Optional:
//! - SWAPI_PHASE_ID (only list commissions in this phase)

use std::env;

use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::SimpleLogger;
use swapi_lib::SwapiClient;
use swapi_lib::auth::Credentials;
use swapi_lib::query::OrderBy;
use swapi_lib::query::Query;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    let _ = SimpleLogger::init(LevelFilter::Info, Config::default());

    let url = env::var("SWAPI_URL").expect("SWAPI_URL not set");
    let credentials = Credentials::new(
        env::var("SWAPI_CLIENT_ID").expect("SWAPI_CLIENT_ID not set"),
        env::var("SWAPI_AUTH_TOKEN").expect("SWAPI_AUTH_TOKEN not set"),
        env::var("SWAPI_LOGIN").expect("SWAPI_LOGIN not set"),
        env::var("SWAPI_PASSWORD").expect("SWAPI_PASSWORD not set"),
    );

    // Logs in on the first request and again whenever the token is rejected.
    let client = SwapiClient::builder()
        .url(url)
        .credentials(credentials)
        .build()?;

    let mut query = Query::new()
        .fields(&["id", "number", "createdAt"])
        .order_by(OrderBy::desc("createdAt"))
        .limit(25)
        .with_relations(false);
    if let Ok(phase) = env::var("SWAPI_PHASE_ID") {
        query = query.filter("commissionPhase.commissionPhaseId", phase.parse::<i64>()?);
    }

    let mut pages = client.commissions().pages(&query);
    while let Some(page) = pages.next().await {
        let page = page?;
        println!("Page {} ({} items)", page.number(), page.len());
        for commission in page.items() {
            println!("  #{} {}", commission["id"], commission["number"]);
        }
    }

    Ok(())
}
