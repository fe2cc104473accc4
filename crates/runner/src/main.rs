//! Command-line driver for the Lazada client.
//!
//! App credentials come from `LAZADA_APP_KEY` / `LAZADA_APP_SECRET` and the
//! seller token from `LAZADA_ACCESS_TOKEN` (a `.env` file is honoured).

use auth::AccessToken;
use chrono::{DateTime, NaiveDate, Utc};
use lazada_rest::{
    GetPayoutRequest, GetProductRequest, LazadaClient, LazadaError, ListOrdersRequest,
    ListProductsRequest, ListTransactionsRequest, ProductFilter,
};
use serde::Serialize;
use tracing::{error, info};

const USAGE: &str = "\
usage: lazada <command> [args]

commands:
  auth-url                      print the seller authorization URL
  token <code>                  exchange an authorization code for a token
  refresh <refresh_token>       refresh a token
  seller                        seller profile
  metrics                       seller performance metrics
  products [filter]             list products (all, live, inactive, ...)
  product <item_id>             one product
  orders <created_after>        orders created after an RFC 3339 time
  order <order_id>              one order
  order-items <order_id>        items of one order
  payouts <YYYY-MM-DD>          payout statements created after a date
  transactions <start> <end>    transaction details between two dates";

#[tokio::main]
async fn main() {
    common::init_logging();

    let args = std::env::args().skip(1).collect::<Vec<_>>();

    let Some(command) = args.first() else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };

    if matches!(command.as_str(), "help" | "-h" | "--help") {
        println!("{}", USAGE);
        return;
    }

    if let Err(e) = run(command, &args[1..]).await {
        error!(command = %command, error = %e, "Command failed");
        std::process::exit(1);
    }
}

async fn run(command: &str, args: &[String]) -> Result<(), LazadaError> {
    let client = LazadaClient::from_env()?;
    info!(region = %client.region(), app_key = %client.app_key(), "Lazada client ready");

    match command {
        "auth-url" => {
            println!("{}", client.authorization_url());
            Ok(())
        }
        "token" => print_json(&client.create_token(arg(args, 0, "code")?).await?),
        "refresh" => print_json(
            &client
                .refresh_token(arg(args, 0, "refresh_token")?)
                .await?,
        ),
        "seller" => print_json(&client.get_seller(&access_token()?).await?),
        "metrics" => print_json(&client.get_seller_metrics(&access_token()?).await?),
        "products" => {
            let request = ListProductsRequest {
                filter: args
                    .first()
                    .map(|f| f.parse::<ProductFilter>())
                    .transpose()?,
                ..Default::default()
            };
            print_json(&client.list_products(&access_token()?, &request).await?)
        }
        "product" => {
            let request = GetProductRequest::by_item_id(parse_id(arg(args, 0, "item_id")?)?);
            print_json(&client.get_product(&access_token()?, &request).await?)
        }
        "orders" => {
            let request = ListOrdersRequest::created_after(parse_time(arg(
                args,
                0,
                "created_after",
            )?)?);
            print_json(&client.list_orders(&access_token()?, &request).await?)
        }
        "order" => {
            let order_id = parse_id(arg(args, 0, "order_id")?)?;
            print_json(&client.get_order(&access_token()?, order_id).await?)
        }
        "order-items" => {
            let order_id = parse_id(arg(args, 0, "order_id")?)?;
            print_json(&client.get_order_items(&access_token()?, order_id).await?)
        }
        "payouts" => {
            let request = GetPayoutRequest {
                created_after: parse_date(arg(args, 0, "date")?)?,
            };
            print_json(&client.get_payout_status(&access_token()?, &request).await?)
        }
        "transactions" => {
            let request = ListTransactionsRequest::new(
                parse_date(arg(args, 0, "start")?)?,
                parse_date(arg(args, 1, "end")?)?,
            );
            print_json(&client.list_transactions(&access_token()?, &request).await?)
        }
        other => Err(LazadaError::InvalidRequest(format!(
            "unknown command '{}'\n{}",
            other, USAGE
        ))),
    }
}

fn access_token() -> Result<AccessToken, LazadaError> {
    Ok(AccessToken::from_env()?)
}

fn arg<'a>(args: &'a [String], index: usize, name: &str) -> Result<&'a str, LazadaError> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| LazadaError::InvalidRequest(format!("missing argument <{}>", name)))
}

fn parse_id(value: &str) -> Result<i64, LazadaError> {
    value
        .parse()
        .map_err(|_| LazadaError::InvalidRequest(format!("'{}' is not a numeric ID", value)))
}

fn parse_time(value: &str) -> Result<DateTime<Utc>, LazadaError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| LazadaError::InvalidRequest(format!("'{}': {}", value, e)))
}

fn parse_date(value: &str) -> Result<NaiveDate, LazadaError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| LazadaError::InvalidRequest(format!("'{}': {}", value, e)))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), LazadaError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| LazadaError::Parse(e.to_string()))?;
    println!("{}", text);
    Ok(())
}
