use anyhow::Result;
use log::info;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::env;
use std::path::Path;

use loyalty_ledger::logging::init_logging;
use loyalty_ledger::{load_purchases, Customer, LedgerConfig, LoyaltyLedger, VERSION};

const CONFIG_ENV_VAR: &str = "LOYALTY_LEDGER_CONFIG";

fn main() -> Result<()> {
    let _logger = init_logging()?;
    let args: Vec<String> = env::args().collect();

    let mut ledger = build_ledger()?;
    info!("event=start version={}", VERSION);

    if args.len() > 2 && args[1] == "import" {
        run_import(&mut ledger, Path::new(&args[2]))?;
    } else if args.len() > 1 && args[1] == "import" {
        eprintln!("❌ Missing CSV path");
        eprintln!("   Usage: loyalty-ledger import <purchases.csv>");
        std::process::exit(2);
    } else {
        run_demo(&mut ledger)?;
    }

    Ok(())
}

fn build_ledger() -> Result<LoyaltyLedger> {
    let config = match env::var(CONFIG_ENV_VAR) {
        Ok(path) => {
            info!("event=config_load path={}", path);
            LedgerConfig::from_file(&path)?
        }
        Err(_) => LedgerConfig::default(),
    };

    Ok(LoyaltyLedger::with_config(config)?)
}

fn run_demo(ledger: &mut LoyaltyLedger) -> Result<()> {
    use loyalty_ledger::Tier;

    let mut joao = ledger.register_customer("João Silva", Tier::Standard);
    let mut maria = ledger.register_customer("Maria Santos", Tier::Premium);
    let mut pedro = ledger.register_customer("Pedro Costa", Tier::Vip);

    for customer in [&mut joao, &mut maria, &mut pedro] {
        ledger.record_purchase(customer, dec!(100));
    }

    for customer in [&joao, &maria, &pedro] {
        println!(
            "{} ({}) has {} points",
            customer.name,
            customer.tier,
            ledger.get_balance(customer)?
        );
    }

    let discount = ledger.redeem_points(&mut joao, dec!(50))?;
    println!(
        "{} redeemed 50 points for a discount of {:.2}",
        joao.name, discount
    );

    let customers = vec![joao, maria, pedro];

    let above = ledger.filter_above(&customers, dec!(100));
    println!("Customers with more than 100 points: {}", above.len());

    print_ranking(ledger, &customers);

    println!(
        "Total points across all customers: {}",
        ledger.total_points(&customers)
    );

    Ok(())
}

fn run_import(ledger: &mut LoyaltyLedger, csv_path: &Path) -> Result<()> {
    println!("📂 Loading purchases from {:?}...", csv_path);
    let records = load_purchases(csv_path)?;

    let summary = ledger.apply_purchases(&records);
    println!(
        "✓ {} purchases recorded, {} skipped, {} new customers, {} points accrued",
        summary.purchases_recorded, summary.skipped, summary.registered, summary.points_accrued
    );

    let mut customers: Vec<Customer> = Vec::new();
    for record in &records {
        if let Some(customer) = ledger.get(&record.name) {
            if ledger.find_by_name(&customers, &customer.name).is_none() {
                customers.push(customer.clone());
            }
        }
    }

    print_ranking(ledger, &customers);
    Ok(())
}

fn print_ranking(ledger: &LoyaltyLedger, customers: &[Customer]) {
    println!("Ranking by points:");
    for (index, customer) in ledger.sort_by_points_descending(customers).iter().enumerate() {
        let points: Decimal = ledger.resolved_balance(customer);
        println!("{}. {} - {:.2} points", index + 1, customer.name, points);
    }
}
