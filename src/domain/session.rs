use serde::Deserialize;

/// The platform is multi-role; only members drive the contribution flow,
/// but the login response carries whichever role the account has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Member,
    Admin,
    Treasurer,
    Secretary,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub role: Role,
}

/// Authenticated session, passed explicitly to every network-calling
/// component. Dropping the context is logout; there is no ambient token
/// storage anywhere in the crate.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionContext {
    pub token: String,
    pub user: UserProfile,
}

/// Attach the session's bearer token to an outgoing request.
pub fn attach_auth(
    builder: reqwest::RequestBuilder,
    session: &SessionContext,
) -> reqwest::RequestBuilder {
    builder.bearer_auth(&session.token)
}
