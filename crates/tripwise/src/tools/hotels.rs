//! `find_hotels`: nightly-price-capped hotel search via a RapidAPI
//! booking aggregator.

use crate::ToolDef;
use crate::tools::core::{Tool, ToolFuture, ToolOutput, parse_tool_args};
use crate::tools::failure::ToolFailure;
use crate::tools::spec::ToolSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Number of listings requested and rendered.
pub const MAX_LISTINGS: usize = 3;

/// Name of the credential, as shown in error text.
pub const CREDENTIAL_NAME: &str = "RapidAPI key";

/// Arguments for `find_hotels`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct HotelArgs {
    /// The city to search for hotels in.
    pub city: String,
    /// Maximum price per night in USD.
    pub max_price: i64,
}

/// One summarized listing.
#[derive(Debug, Clone, PartialEq)]
pub struct HotelListing {
    pub name: String,
    pub nightly_price: Option<f64>,
    pub rating: Option<f64>,
}

impl HotelListing {
    /// Render as one markdown bullet.
    pub fn to_line(&self) -> String {
        let price = match self.nightly_price {
            Some(p) => format!("~${p}/night"),
            None => "Price not available".to_string(),
        };
        let rating = match self.rating {
            Some(r) => format!("{r}/10"),
            None => "No rating".to_string(),
        };
        format!("- **{}** ({price}, Rating: {rating})", self.name)
    }
}

/// Request body for the aggregator's search endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchPayload<'a> {
    search: &'a str,
    max_items: usize,
    currency: &'static str,
    language: &'static str,
    rooms: u32,
    adults: u32,
    children: u32,
    min_max_price: String,
}

impl<'a> SearchPayload<'a> {
    fn new(city: &'a str, max_price: i64) -> Self {
        Self {
            search: city,
            max_items: MAX_LISTINGS,
            currency: "USD",
            language: "en-gb",
            rooms: 1,
            adults: 1,
            children: 0,
            min_max_price: format!("0-{max_price}"),
        }
    }
}

/// A number, or a string holding one.
fn numeric(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Shown in place of a missing or blank hotel name.
const UNNAMED_HOTEL: &str = "N/A";

/// Any JSON object is a listing; everything else is skipped.
fn parse_listing(entry: &Value) -> Option<HotelListing> {
    let obj = entry.as_object()?;
    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(UNNAMED_HOTEL);
    Some(HotelListing {
        name: name.to_string(),
        nightly_price: numeric(obj.get("price")),
        rating: numeric(obj.get("review_score")),
    })
}

/// Turn a search response body into the tool's text.
///
/// A missing `data` or `data.hotels` counts as zero listings. Only the first
/// [`MAX_LISTINGS`] entries are considered.
pub fn summarize_response(city: &str, max_price: i64, body: &str) -> Result<String, ToolFailure> {
    let catch_all = || ToolFailure::HotelParse {
        city: city.to_string(),
        max_price,
    };

    let root: Value = serde_json::from_str(body).map_err(|_| catch_all())?;
    let hotels = match root.get("data") {
        None | Some(Value::Null) => None,
        Some(Value::Object(data)) => match data.get("hotels") {
            None | Some(Value::Null) => None,
            Some(Value::Array(list)) => Some(list),
            Some(_) => return Err(catch_all()),
        },
        Some(_) => return Err(catch_all()),
    };

    let hotels = match hotels {
        Some(list) if !list.is_empty() => list,
        _ => {
            return Err(ToolFailure::NoHotels {
                city: city.to_string(),
                max_price,
            });
        }
    };

    let lines: Vec<String> = hotels
        .iter()
        .take(MAX_LISTINGS)
        .filter_map(parse_listing)
        .map(|listing| listing.to_line())
        .collect();

    if lines.is_empty() {
        return Err(ToolFailure::UnparseableHotels {
            city: city.to_string(),
            max_price,
        });
    }

    Ok(format!(
        "Here are some hotel options that fit your budget:\n{}",
        lines.join("\n")
    ))
}

/// Hotel search against a RapidAPI-style endpoint.
///
/// The API key is optional at construction; without one, every call
/// short-circuits with a configuration failure and makes no request.
#[derive(Clone)]
pub struct HotelSearch {
    client: reqwest::Client,
    api_key: Option<String>,
    url: String,
    host: String,
}

impl std::fmt::Debug for HotelSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HotelSearch")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("url", &self.url)
            .field("host", &self.host)
            .finish()
    }
}

impl HotelSearch {
    pub fn new(
        client: reqwest::Client,
        api_key: Option<String>,
        url: impl Into<String>,
        host: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            url: url.into(),
            host: host.into(),
        }
    }

    /// Search for up to three hotels in `city` at or under `max_price` per
    /// night. Always returns text.
    pub async fn search(&self, city: &str, max_price: i64) -> ToolOutput {
        if max_price < 0 {
            return ToolOutput::failed(ToolFailure::InvalidArguments(format!(
                "max_price must not be negative (got {max_price})"
            )));
        }
        self.try_search(city, max_price).await.into()
    }

    async fn try_search(&self, city: &str, max_price: i64) -> Result<String, ToolFailure> {
        let Some(api_key) = &self.api_key else {
            return Err(ToolFailure::MissingCredential {
                credential: CREDENTIAL_NAME,
            });
        };

        let transport = |e: reqwest::Error| ToolFailure::HotelTransport {
            reason: e.to_string(),
        };

        let resp = self
            .client
            .post(&self.url)
            .header("X-RapidAPI-Key", api_key)
            .header("X-RapidAPI-Host", &self.host)
            .json(&SearchPayload::new(city, max_price))
            .send()
            .await
            .map_err(transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ToolFailure::HotelHttp {
                status: status.to_string(),
                body,
            });
        }

        let body = resp.text().await.map_err(transport)?;
        debug!("Hotel search for {city} returned {} bytes", body.len());
        summarize_response(city, max_price, &body)
    }
}

impl Tool for HotelSearch {
    fn definition(&self) -> ToolDef {
        ToolSpec::builder(
            super::FIND_HOTELS,
            "Find up to three hotels in a city at or under a maximum nightly price in USD",
        )
        .when_to_use(
            "Once you have computed the maximum nightly price from the traveller's budget",
        )
        .when_not_to_use("For food or transport costs; use get_daily_spend_estimate instead")
        .parameters_for::<HotelArgs>()
        .example(
            r#"find_hotels(city="Paris", max_price=135)"#,
            "Here are some hotel options that fit your budget:\n\
             - **Hotel Lumiere** (~$120/night, Rating: 8.5/10)",
        )
        .output_format("A header line followed by one markdown bullet per hotel")
        .to_tool_def()
    }

    fn execute(&self, arguments: &str) -> ToolFuture<'_> {
        let parsed = parse_tool_args::<HotelArgs>(arguments);
        Box::pin(async move {
            match parsed {
                Ok(args) => self.search(&args.city, args.max_price).await,
                Err(failure) => ToolOutput::failed(failure),
            }
        })
    }
}
