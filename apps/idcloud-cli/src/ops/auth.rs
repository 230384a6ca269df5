//! Login: complete a session with cookie name, token and platform version

use crate::api::{auth, ApiClient};
use crate::error::{CliError, CliResult};
use tracing::{debug, info, warn};

/// Complete the client's session
///
/// Reads the cookie name from server info, then exchanges username and
/// password for a session token when both are present. A session that ends
/// up with neither a cookie nor a bearer token is rejected. The platform
/// version is recorded when available; failing to read it only warns.
pub async fn login(client: &mut ApiClient) -> CliResult<()> {
    let server_info = auth::get_server_info(client).await?;
    debug!(cookie_name = %server_info.cookie_name, "server info");
    client.session_mut().cookie_name = Some(server_info.cookie_name);

    let credentials = {
        let session = client.session();
        session.username.clone().zip(session.password.clone())
    };
    if let Some((username, password)) = credentials {
        let response = auth::authenticate(client, &username, &password).await?;
        let token = response.token_id.ok_or_else(|| {
            CliError::AuthenticationFailed(
                "additional authentication steps are required".to_string(),
            )
        })?;
        client.session_mut().cookie_value = Some(token);
        info!(%username, "authenticated");
    }

    if !client.session().is_authenticated() {
        return Err(CliError::NotAuthenticated);
    }

    match auth::get_server_version(client).await {
        Ok(version) => {
            client.session_mut().am_version = version.version().map(String::from);
        }
        Err(e) => warn!(error = %e, "could not read platform version"),
    }
    Ok(())
}
