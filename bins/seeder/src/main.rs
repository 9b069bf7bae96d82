//! Demo data seeder for Vendra development and testing.
//!
//! Seeds a demo tenant with the default chart of accounts and posts a
//! handful of representative business events, then prints the resulting
//! trial balance.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;
use vendra_core::ledger::CashChannel;
use vendra_db::adapters::{EventContext, LedgerEvents};
use vendra_db::repositories::AccountRepository;

/// Demo organization ID (consistent for all seeds)
const DEMO_ORG_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Demo user ID (consistent for all seeds)
const DEMO_USER_ID: &str = "00000000-0000-0000-0000-000000000002";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vendra=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = vendra_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    let org = demo_org_id();
    let actor = demo_user_id();

    println!("Seeding default chart of accounts...");
    let accounts = AccountRepository::new(db.clone());
    let inserted = accounts
        .ensure_default_accounts(org)
        .await
        .expect("Failed to seed default accounts");
    if inserted == 0 {
        println!("  Chart already seeded, skipping...");
    } else {
        println!("  Inserted {inserted} accounts");
    }

    println!("Posting demo business events...");
    let events = LedgerEvents::new(db.clone());
    let ctx = EventContext {
        organization_id: org,
        entry_date: Utc::now().date_naive(),
        reference_id: Some(Uuid::new_v4()),
        actor_id: Some(actor),
    };

    // A partially paid order with a known cost of goods.
    events
        .order_posted(
            ctx,
            Decimal::from(1500),
            Decimal::from(900),
            Decimal::from(600),
            CashChannel::CashOnHand,
        )
        .await;

    // The customer settles the remainder.
    events
        .collection_recorded(ctx, Decimal::from(600), CashChannel::Bank)
        .await;

    // Stock purchased on credit, half paid up front.
    events
        .raw_material_purchased(ctx, Decimal::from(800), Decimal::from(400))
        .await;

    // Month-end payroll.
    events.payroll_processed(ctx, Decimal::from(350)).await;

    println!("Trial balance:");
    let trial_balance = accounts
        .trial_balance(org)
        .await
        .expect("Failed to build trial balance");
    for row in &trial_balance.rows {
        if row.debit.is_zero() && row.credit.is_zero() {
            continue;
        }
        println!(
            "  {:<6} {:<28} {:>12} {:>12}",
            row.code, row.name, row.debit, row.credit
        );
    }
    println!(
        "  {:<35} {:>12} {:>12}",
        "Totals", trial_balance.total_debit, trial_balance.total_credit
    );
    println!(
        "  Balanced: {}",
        if trial_balance.is_balanced() { "yes" } else { "NO" }
    );

    println!("Seeding complete!");
}

fn demo_org_id() -> Uuid {
    Uuid::parse_str(DEMO_ORG_ID).unwrap()
}

fn demo_user_id() -> Uuid {
    Uuid::parse_str(DEMO_USER_ID).unwrap()
}
