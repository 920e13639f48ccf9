//! ABAX profile claims carried in id tokens.

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Claims of an id token issued with the `abax_profile` scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct AbaxProfile {
    pub iss: String,
    pub nbf: i64,
    pub iat: i64,
    pub exp: i64,
    pub aud: String,
    pub amr: Vec<String>,
    pub at_hash: String,
    pub sid: String,
    pub sub: String,
    pub auth_time: i64,
    pub idp: String,
    #[serde(rename = "http://schemas.abax.no/identity/claims/username")]
    pub username: String,
    pub role: String,
    pub name: String,
    pub locale: String,
    #[serde(rename = "http://schemas.abax.no/identity/claims/organizationid")]
    pub organization_id: String,
    #[serde(rename = "http://schemas.abax.no/identity/claims/countrycode")]
    pub country_code: String,
    pub email: String,
    pub email_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(rename = "http://schemas.abax.no/identity/claims/securitystamp")]
    pub security_stamp: String,
}

/// Decode the profile claims of an id token.
///
/// The signature is not verified: the token is expected to come straight
/// from the identity server's token endpoint over TLS.
pub fn decode_profile(id_token: &str) -> Result<AbaxProfile> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = jsonwebtoken::decode::<AbaxProfile>(
        id_token,
        &DecodingKey::from_secret(&[]),
        &validation,
    )?;
    Ok(data.claims)
}
