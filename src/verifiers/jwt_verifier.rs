#[allow(unused_imports)]
use cached::proc_macro::cached;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::TokenVerifier;

/// Verifies ID tokens issued by an OpenID-style identity provider.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
pub struct JwtVerifierConfig {
    pub name: String,
    /// Where the provider publishes its JWK set.
    pub cert_uri: String,
    /// Expected `iss` claim.
    pub issuer: String,
    /// Expected `aud` claim, usually the project or client id.
    pub audience: String,
}

/// Token verifier that validates JWTs against keys downloaded from `cert_uri`.
pub struct JwtVerifier {
    pub config: JwtVerifierConfig,
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
}

impl JwtVerifier {
    pub fn new(config: &JwtVerifierConfig) -> Self {
        info!(
            "Creating JWT verifier '{}' for issuer '{}'",
            config.name, config.issuer
        );
        Self {
            config: config.clone(),
        }
    }
}

#[async_trait::async_trait]
impl TokenVerifier for JwtVerifier {
    fn get_name(&self) -> &str {
        &self.config.name
    }

    /// Checks signature, expiry, issuer and audience, then returns `sub`.
    async fn verify(&self, token: &str) -> Result<String, String> {
        let header =
            decode_header(token).map_err(|e| format!("Failed to decode JWT header: {}", e))?;

        let alg = match header.alg {
            Algorithm::RS256 | Algorithm::RS512 | Algorithm::HS256 | Algorithm::HS512 => {
                header.alg
            }
            other => return Err(format!("Unsupported JWT algorithm: {:?}", other)),
        };

        let kid = header.kid.ok_or("Missing 'kid' in JWT header")?;
        debug!("Using kid: {}", kid);

        let certs = get_certs(self.config.cert_uri.clone()).await?;
        let jwks: JwkSet = serde_json::from_str(&certs)
            .map_err(|e| format!("Failed to parse certificates: {}", e))?;
        let jwk = jwks
            .find(&kid)
            .ok_or_else(|| format!("Failed to find certificate with matching kid {}", kid))?;
        let decoding_key = DecodingKey::from_jwk(jwk)
            .map_err(|e| format!("Failed to create decoding key from JWK: {}", e))?;

        let mut validation = Validation::new(alg);
        validation.set_issuer(&[self.config.issuer.as_str()]);
        validation.set_audience(&[self.config.audience.as_str()]);

        let claims = decode::<Claims>(token, &decoding_key, &validation)
            .map_err(|e| format!("Failed to decode JWT: {}", e))?
            .claims;

        if claims.sub.is_empty() {
            return Err("JWT has an empty 'sub' claim".to_string());
        }
        Ok(claims.sub)
    }
}

/// Retrieves the JWK set from a remote URI. Cached for 600s to avoid repeated fetches.
#[cfg_attr(not(test), cached(time = 600, result = true, sync_writes = true))]
pub async fn get_certs(cert_uri: String) -> Result<String, String> {
    debug!("Fetching certificates from {}", cert_uri);
    let res = reqwest::get(&cert_uri)
        .await
        .map_err(|e| format!("Failed to download certificates: {}", e))?;

    if res.status().is_success() {
        let json: Value = res
            .json()
            .await
            .map_err(|e| format!("Failed to parse certificate JSON: {}", e))?;
        Ok(json.to_string())
    } else {
        Err(format!("Failed to download certificates: {}", res.status()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use mockito::Server;
    use serde_json::json;

    // "c2VjcmV0" is base64url for "secret".
    const JWKS: &str = r#"{"keys": [{"kty": "oct", "k": "c2VjcmV0", "alg": "HS512", "kid": "testkid"}]}"#;

    async fn jwks_server() -> (mockito::ServerGuard, mockito::Mock) {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(JWKS)
            .create_async()
            .await;
        (server, mock)
    }

    fn verifier_for(url: &str) -> JwtVerifier {
        JwtVerifier::new(&JwtVerifierConfig {
            name: "TestJWT".to_string(),
            cert_uri: url.to_string(),
            issuer: "https://issuer.test/board".to_string(),
            audience: "board".to_string(),
        })
    }

    fn sign(claims: serde_json::Value, kid: &str) -> String {
        let mut header = Header::new(Algorithm::HS512);
        header.kid = Some(kid.to_string());
        encode(&header, &claims, &EncodingKey::from_secret(b"secret"))
            .expect("Failed to create token")
    }

    fn valid_claims() -> serde_json::Value {
        json!({
            "sub": "uid-123",
            "iss": "https://issuer.test/board",
            "aud": "board",
            "exp": 4102444800u64,
        })
    }

    #[tokio::test]
    async fn test_get_certs_failure() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/")
            .with_status(500)
            .with_body("Internal Server Error")
            .create_async()
            .await;
        let result = get_certs(server.url()).await;
        m.assert_async().await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_valid_token_yields_sub() {
        let (server, mock) = jwks_server().await;
        let token = sign(valid_claims(), "testkid");

        let uid = verifier_for(&server.url())
            .verify(&token)
            .await
            .expect("verification should succeed");
        mock.assert_async().await;
        assert_eq!(uid, "uid-123");
    }

    #[tokio::test]
    async fn test_wrong_audience_is_rejected() {
        let (server, _mock) = jwks_server().await;
        let mut claims = valid_claims();
        claims["aud"] = json!("someone-else");

        let result = verifier_for(&server.url()).verify(&sign(claims, "testkid")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_wrong_issuer_is_rejected() {
        let (server, _mock) = jwks_server().await;
        let mut claims = valid_claims();
        claims["iss"] = json!("https://evil.test");

        let result = verifier_for(&server.url()).verify(&sign(claims, "testkid")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let (server, _mock) = jwks_server().await;
        let mut claims = valid_claims();
        claims["exp"] = json!(1_000_000_000u64);

        let result = verifier_for(&server.url()).verify(&sign(claims, "testkid")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_unknown_kid_is_rejected() {
        let (server, _mock) = jwks_server().await;
        let result = verifier_for(&server.url())
            .verify(&sign(valid_claims(), "otherkid"))
            .await;
        let err = result.unwrap_err();
        assert!(err.contains("otherkid"));
    }

    #[tokio::test]
    async fn test_empty_sub_is_rejected() {
        let (server, _mock) = jwks_server().await;
        let mut claims = valid_claims();
        claims["sub"] = json!("");

        let result = verifier_for(&server.url()).verify(&sign(claims, "testkid")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_garbage_token_is_rejected() {
        let verifier = verifier_for("http://127.0.0.1:9");
        assert!(verifier.verify("not.a.jwt").await.is_err());
    }
}
