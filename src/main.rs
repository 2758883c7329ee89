use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use clt_pj_engine::api::{AppState, CltRequest, CompareRequest, PjRequest, create_router};
use clt_pj_engine::calculation::{calculate_clt_with, calculate_pj_with, compare};
use clt_pj_engine::config::{ConfigLoader, TaxTables};
use clt_pj_engine::models::ViewMode;

/// Compare take-home pay under CLT and PJ (Simples Nacional).
///
/// Amounts are monthly BRL. Results are printed as JSON.
#[derive(Parser, Debug)]
#[command(name = "clt-pj-engine")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory with tax_year.yaml, inss.yaml, irrf.yaml and simples.yaml;
    /// the built-in 2025 tables are used when absent
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Net income for a CLT salary
    Clt {
        /// Monthly gross salary
        #[arg(allow_negative_numbers = true)]
        gross: Decimal,

        /// Monthly untaxed benefits
        #[arg(short, long, default_value_t = Decimal::ZERO)]
        benefits: Decimal,
    },
    /// Net income for a PJ invoice
    Pj {
        /// Monthly gross invoice
        #[arg(allow_negative_numbers = true)]
        gross: Decimal,

        /// Monthly accounting fee
        #[arg(short, long)]
        accountant_cost: Option<Decimal>,
    },
    /// Compare a CLT offer with a PJ offer
    Compare {
        /// CLT monthly gross salary
        #[arg(long)]
        clt: Decimal,

        /// PJ monthly gross invoice
        #[arg(long)]
        pj: Decimal,

        /// CLT monthly benefits
        #[arg(short, long, default_value_t = Decimal::ZERO)]
        benefits: Decimal,

        /// Monthly health plan paid by the PJ company
        #[arg(long, default_value_t = Decimal::ZERO)]
        health: Decimal,

        /// Monthly accounting fee
        #[arg(short, long)]
        accountant_cost: Option<Decimal>,

        /// Base the verdict on annual instead of monthly take-home
        #[arg(short, long, default_value_t = false)]
        yearly: bool,
    },
}

fn make_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn load_tables(config: Option<&PathBuf>) -> Result<ConfigLoader> {
    match config {
        Some(dir) => ConfigLoader::load(dir)
            .with_context(|| format!("Failed to load tax tables from: {}", dir.display())),
        None => Ok(ConfigLoader::from_tables(TaxTables::builtin().clone())),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
    println!("{}", json);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(make_filter())
        .with_writer(std::io::stderr)
        .init();

    let loader = load_tables(args.config.as_ref())?;

    match args.command {
        Command::Serve { port } => {
            let addr = SocketAddr::from(([0, 0, 0, 0], port));
            let app = create_router(AppState::new(loader));

            let listener = TcpListener::bind(addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            info!(%addr, "CLT vs PJ API listening");

            axum::serve(listener, app).await.context("Server error")?;
        }
        Command::Clt { gross, benefits } => {
            let request = CltRequest {
                gross_salary: gross,
                benefits,
            };
            request.validate()?;
            print_json(&calculate_clt_with(
                loader.tables(),
                request.gross_salary,
                request.benefits,
            ))?;
        }
        Command::Pj {
            gross,
            accountant_cost,
        } => {
            let request = PjRequest {
                gross_invoice: gross,
                accountant_cost,
            };
            request.validate()?;
            let tables = loader.tables();
            let cost = request
                .accountant_cost
                .unwrap_or(tables.simples().default_accountant_cost);
            print_json(&calculate_pj_with(tables, request.gross_invoice, cost))?;
        }
        Command::Compare {
            clt,
            pj,
            benefits,
            health,
            accountant_cost,
            yearly,
        } => {
            let request = CompareRequest {
                clt_gross: clt,
                clt_benefits: benefits,
                pj_gross: pj,
                pj_health_cost: health,
                accountant_cost,
                view: if yearly {
                    ViewMode::Yearly
                } else {
                    ViewMode::Monthly
                },
            };
            request.validate()?;
            let tables = loader.tables();
            let input = request.into_input(tables.simples().default_accountant_cost);
            print_json(&compare(tables, &input))?;
        }
    }

    Ok(())
}
