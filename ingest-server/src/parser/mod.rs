//! Free-text order command parser
//!
//! Marketers forward customer details as WhatsApp messages in a loose
//! `key: value` format, mixing Malay and English field names. This module
//! turns such a message into a structured draft, or `None` when the text
//! is not an order command at all.
//!
//! The parser is pure and total: no I/O, no panics, any input yields
//! either a draft or `None`.

use shared::models::{ClosingChannel, PaymentMethod, Platform};

/// Marker that must open the message (first non-empty line, case-insensitive)
const ORDER_MARKER: &str = "#order";

/// Structured order draft extracted from a message.
///
/// Phone is kept raw here; normalization happens in the workflow where
/// the country code is known.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub customer_name: String,
    /// Empty when the message names no phone; the webhook falls back to
    /// the gateway sender in that case
    pub customer_phone: String,
    pub address: String,
    pub postcode: String,
    pub city: String,
    pub state: String,
    pub product: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub payment_method: PaymentMethod,
    /// None when the message names no recognizable platform
    pub platform: Option<Platform>,
    pub channel: ClosingChannel,
}

/// Field synonym tables, Malay first since that is what marketers type
const NAME_KEYS: &[&str] = &["nama", "name"];
const PHONE_KEYS: &[&str] = &["telefon", "no tel", "phone"];
const ADDRESS_KEYS: &[&str] = &["alamat", "address"];
const POSTCODE_KEYS: &[&str] = &["poskod", "peskod", "postcode"];
const CITY_KEYS: &[&str] = &["bandar", "city"];
const STATE_KEYS: &[&str] = &["negeri", "state"];
const PRODUCT_KEYS: &[&str] = &["produk", "product"];
const QUANTITY_KEYS: &[&str] = &["kuantiti", "qty", "quantity"];
const PRICE_KEYS: &[&str] = &["harga", "price"];
const PLATFORM_KEYS: &[&str] = &["platform"];
const PAYMENT_KEYS: &[&str] = &["bayaran", "payment"];
const CHANNEL_KEYS: &[&str] = &["closing", "channel"];

/// Parse a raw message into an order draft.
///
/// Returns `None` if the marker is missing or any required field (name,
/// address, postcode, product) is absent or empty. Phone is optional
/// here since the transport may know the sender. Unknown keys are
/// ignored.
pub fn parse(message: &str) -> Option<OrderDraft> {
    let mut lines = message.lines().map(str::trim).filter(|l| !l.is_empty());
    if !lines.next()?.eq_ignore_ascii_case(ORDER_MARKER) {
        return None;
    }

    let mut name = None;
    let mut phone = None;
    let mut address = None;
    let mut postcode = None;
    let mut city = None;
    let mut state = None;
    let mut product = None;
    let mut quantity = None;
    let mut price = None;
    let mut platform = None;
    let mut payment = None;
    let mut channel = None;

    for line in lines {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().to_lowercase();
        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        if matches_key(&key, NAME_KEYS) {
            name = Some(value.to_string());
        } else if matches_key(&key, PHONE_KEYS) {
            phone = Some(value.to_string());
        } else if matches_key(&key, ADDRESS_KEYS) {
            address = Some(value.to_string());
        } else if matches_key(&key, POSTCODE_KEYS) {
            postcode = Some(value.to_string());
        } else if matches_key(&key, CITY_KEYS) {
            city = Some(value.to_string());
        } else if matches_key(&key, STATE_KEYS) {
            state = Some(value.to_string());
        } else if matches_key(&key, PRODUCT_KEYS) {
            product = Some(value.to_string());
        } else if matches_key(&key, QUANTITY_KEYS) {
            quantity = value.parse::<i64>().ok().filter(|q| *q >= 1);
        } else if matches_key(&key, PRICE_KEYS) {
            price = parse_price(value);
        } else if matches_key(&key, PLATFORM_KEYS) {
            platform = parse_platform(value);
        } else if matches_key(&key, PAYMENT_KEYS) {
            payment = Some(parse_payment(value));
        } else if matches_key(&key, CHANNEL_KEYS) {
            channel = Some(parse_channel(value));
        }
    }

    Some(OrderDraft {
        customer_name: name?,
        customer_phone: phone.unwrap_or_default(),
        address: address?,
        postcode: postcode?,
        city: city.unwrap_or_default(),
        state: state.unwrap_or_default(),
        product: product?,
        quantity: quantity.unwrap_or(1),
        unit_price: price.unwrap_or(0.0),
        payment_method: payment.unwrap_or_default(),
        platform,
        channel: channel.unwrap_or_default(),
    })
}

fn matches_key(key: &str, synonyms: &[&str]) -> bool {
    synonyms.iter().any(|s| key == *s)
}

/// Price values arrive as "100", "RM100", "100.50", "rm 100"
fn parse_price(value: &str) -> Option<f64> {
    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse::<f64>().ok().filter(|p| *p >= 0.0)
}

fn parse_platform(value: &str) -> Option<Platform> {
    let v = value.to_lowercase();
    if v.contains("facebook") || v.contains("fb") {
        Some(Platform::Facebook)
    } else if v.contains("shopee") {
        Some(Platform::Shopee)
    } else if v.contains("tiktok") {
        Some(Platform::Tiktok)
    } else if v.contains("google") {
        Some(Platform::Google)
    } else if v.contains("database") || v == "db" {
        Some(Platform::Database)
    } else {
        None
    }
}

// Exact keyword match: "no cod" or "codeless" must not read as COD
fn parse_payment(value: &str) -> PaymentMethod {
    if value.trim().eq_ignore_ascii_case("cod") {
        PaymentMethod::CashOnDelivery
    } else {
        PaymentMethod::Prepaid
    }
}

fn parse_channel(value: &str) -> ClosingChannel {
    let v = value.to_lowercase();
    if v.contains("call") {
        ClosingChannel::Call
    } else if v.contains("live") {
        ClosingChannel::Live
    } else {
        ClosingChannel::Whatsapp
    }
}
