//! Browser sign-in against the identity provider.
//!
//! `/auth/login` starts an authorization-code flow with PKCE, `/auth/callback`
//! turns the code into a server-side [`Session`] behind a signed cookie and
//! `/auth/logout` drops it again.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    Router,
    extract::{Query, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use cookie::{Cookie, SameSite};
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointNotSet, EndpointSet,
    PkceCodeChallenge, PkceCodeVerifier, RedirectUrl, Scope, TokenResponse, TokenUrl,
    basic::BasicClient,
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio::sync::Mutex;
use types::{Result, SESSION_COOKIE_NAME, UserData, err};
use url::Url;

use crate::{Config, session_token_from_headers, storage::Session};

const LOGIN_TIMEOUT: Duration = Duration::from_secs(600);
const SCOPES: [&str; 3] = ["openid", "profile", "groups"];
const LOGIN_FAILED: &str = "/login?error=sign-in-failed";

/// Client with the authorization and token endpoints configured.
type OAuthClient =
    BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

struct PendingLogin {
    verifier: PkceCodeVerifier,
    started: Instant,
}

#[derive(Clone)]
pub struct AuthState {
    oauth: OAuthClient,
    http: reqwest::Client,
    userinfo_url: Url,
    secure_cookie: bool,
    login_timeout: Duration,
    /// Logins in flight, keyed by their CSRF state.
    pending: Arc<Mutex<HashMap<String, PendingLogin>>>,
}

#[derive(Deserialize)]
struct UserInfo {
    sub: String,
    preferred_username: String,
    name: String,
    #[serde(default)]
    groups: Vec<String>,
}

impl AuthState {
    pub fn new(config: &Config) -> Result<Self> {
        let idp = &config.idp_url;

        let oauth = BasicClient::new(ClientId::new(config.oauth_client_id.clone()))
            .set_client_secret(ClientSecret::new(
                config.oauth_client_secret.expose_secret().to_owned(),
            ))
            .set_auth_uri(AuthUrl::from_url(idp.join("/ui/oauth2")?))
            .set_token_uri(TokenUrl::from_url(idp.join("/oauth2/token")?))
            .set_redirect_uri(RedirectUrl::from_url(
                config.dashgate_url.join("/auth/callback")?,
            ));

        // The token exchange must not follow redirects.
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            oauth,
            http,
            userinfo_url: idp.join(&format!(
                "/oauth2/openid/{}/userinfo",
                config.oauth_client_id
            ))?,
            secure_cookie: config.dashgate_url.scheme() == "https",
            login_timeout: LOGIN_TIMEOUT,
            pending: Arc::default(),
        })
    }

    /// Register a new login and return the provider URL to send the browser to.
    async fn begin_login(&self) -> Url {
        let (challenge, verifier) = PkceCodeChallenge::new_random_sha256();
        let (url, state) = self
            .oauth
            .authorize_url(CsrfToken::new_random)
            .add_scopes(SCOPES.map(|scope| Scope::new(scope.to_owned())))
            .set_pkce_challenge(challenge)
            .url();

        let mut pending = self.pending.lock().await;
        pending.retain(|_, login| login.started.elapsed() < self.login_timeout);
        pending.insert(
            state.into_secret(),
            PendingLogin {
                verifier,
                started: Instant::now(),
            },
        );

        url
    }

    /// Claim the verifier of a login started here. Each state works once.
    async fn take_verifier(&self, state: &str) -> Result<PkceCodeVerifier> {
        let login = self
            .pending
            .lock()
            .await
            .remove(state)
            .ok_or_else(|| err!("unknown login state"))?;

        if login.started.elapsed() >= self.login_timeout {
            return Err(err!("login timed out"));
        }
        Ok(login.verifier)
    }

    async fn fetch_user(&self, code: String, verifier: PkceCodeVerifier) -> Result<UserData> {
        let token = self
            .oauth
            .exchange_code(AuthorizationCode::new(code))
            .set_pkce_verifier(verifier)
            .request_async(&self.http)
            .await
            .map_err(|e| err!("code exchange failed: {e}"))?;
        let access_token = token.access_token().secret();

        let info: UserInfo = self
            .http
            .get(self.userinfo_url.clone())
            .bearer_auth(access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(UserData {
            user_id: info.sub,
            username: info.preferred_username,
            display_name: info.name,
            groups: info.groups,
            access_token: SecretString::from(access_token.clone()),
        })
    }

    fn session_cookie(&self, value: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE_NAME, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure_cookie)
            .build()
    }
}

pub fn auth_router(state: AuthState) -> Router {
    Router::new()
        .route("/auth/login", get(login))
        .route("/auth/callback", get(callback))
        .route("/auth/logout", get(logout))
        .with_state(state)
}

async fn login(State(auth): State<AuthState>) -> Redirect {
    Redirect::to(auth.begin_login().await.as_str())
}

#[derive(Deserialize)]
struct CallbackParams {
    code: String,
    state: String,
}

async fn callback(State(auth): State<AuthState>, Query(params): Query<CallbackParams>) -> Response {
    match sign_in(&auth, params).await {
        Ok(cookie) => ([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response(),
        Err(error) => {
            tracing::warn!(%error, "sign-in failed");
            Redirect::to(LOGIN_FAILED).into_response()
        }
    }
}

/// Finish a login and return the `Set-Cookie` value for the new session.
async fn sign_in(auth: &AuthState, params: CallbackParams) -> Result<String> {
    let verifier = auth.take_verifier(&params.state).await?;
    let user = auth.fetch_user(params.code, verifier).await?;

    let session = Session::create(user).await?;
    tracing::info!(username = %session.user_data().username, "signed in");

    Ok(auth.session_cookie(session.as_token()?).to_string())
}

async fn logout(State(auth): State<AuthState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = session_token_from_headers(&headers)
        && let Err(error) = Session::delete_token(token).await
    {
        tracing::warn!(%error, "failed to delete session on logout");
    }

    let mut cookie = auth.session_cookie(String::new());
    cookie.make_removal();

    (
        [(header::SET_COOKIE, cookie.to_string())],
        Redirect::to("/login"),
    )
}
