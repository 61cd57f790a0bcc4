/// Opaque session token presented by the client. Issuance and revocation
/// happen upstream; this backend only resolves it to a user.
pub struct AccessToken(pub String);
