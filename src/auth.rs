use crate::error::{ResultSplit, SplitError};
use crate::schemas::UserNick;
use actix_web::{http::header::HeaderValue, HttpRequest};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::num::ParseIntError;

type HmacSha256 = Hmac<Sha256>;

/// Signed viewer identity carried in the `Authorization` header.
#[derive(Deserialize, Serialize, Debug, Clone)]
struct ViewerToken {
    username: String,
    issued_at: String,
    hash: String,
}

/// Resolves the member the request is made on behalf of.
pub fn resolve_viewer(request: &HttpRequest, secret: &str) -> ResultSplit<UserNick> {
    let authorization = request
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .map(HeaderValue::to_str)
        .ok_or(SplitError::MissingAuthorization)?
        .map_err(|err| SplitError::InvalidToken(err.to_string()))?;
    verify_token(authorization, secret)
}

pub fn verify_token(token: &str, secret: &str) -> ResultSplit<UserNick> {
    let token: ViewerToken =
        serde_json::from_str(token).map_err(|err| SplitError::InvalidToken(err.to_string()))?;
    if token.hash.len() % 2 != 0 {
        return Err(SplitError::InvalidToken("odd hash length".to_string()));
    }
    let hash = token
        .hash
        .chars()
        .collect::<Vec<_>>()
        .chunks(2)
        .map(|n| u8::from_str_radix(&String::from_iter(n), 16))
        .collect::<Result<Vec<u8>, ParseIntError>>()
        .map_err(|err| SplitError::InvalidToken(err.to_string()))?;

    let mac = token_mac(&token.username, &token.issued_at, secret)?;
    match mac.verify_slice(&hash) {
        Ok(()) => Ok(token.username),
        Err(_) => {
            tracing::debug!(username = %token.username, "viewer token signature mismatch");
            Err(SplitError::Unauthorized(token.username))
        }
    }
}

/// Issues the header value that [`verify_token`] accepts for `username`.
pub fn sign_token(username: &str, issued_at: &str, secret: &str) -> ResultSplit<String> {
    let hash = token_mac(username, issued_at, secret)?
        .finalize()
        .into_bytes()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect::<String>();
    let token = ViewerToken {
        username: username.to_string(),
        issued_at: issued_at.to_string(),
        hash,
    };
    serde_json::to_string(&token).map_err(|err| SplitError::InvalidToken(err.to_string()))
}

fn token_mac(username: &str, issued_at: &str, secret: &str) -> ResultSplit<HmacSha256> {
    let hash_content = [("issued_at", issued_at), ("username", username)]
        .iter()
        .map(|(key, val)| format!("{}={}", key, val))
        .collect::<Vec<_>>()
        .join("\n");
    let mut sha256_hasher = Sha256::new();
    sha256_hasher.update(secret.as_bytes());
    let secret_hash = sha256_hasher.finalize();

    let mut hmac_hasher = HmacSha256::new_from_slice(&secret_hash)
        .map_err(|err| SplitError::InvalidToken(err.to_string()))?;
    hmac_hasher.update(hash_content.as_bytes());
    Ok(hmac_hasher)
}
