use reqwest::Method;

use super::types::{WebLoginRequest, WebLoginResponse};
use super::{ApiClient, ApiError};
use crate::session::types::DeviceToken;

const WEB_LOGIN_PATH: &str = "/auth/web-login";

impl ApiClient {
    /// Exchange an access key plus this install's device token for a
    /// credential and user id. Unauthenticated by definition.
    pub async fn web_login(
        &self,
        access_key: &str,
        device_token: &DeviceToken,
    ) -> Result<WebLoginResponse, ApiError> {
        let body = WebLoginRequest {
            access_key,
            web_token: device_token.as_str(),
        };
        let request = self
            .request(Method::POST, WEB_LOGIN_PATH, None)
            .json(&body);
        self.send_json(WEB_LOGIN_PATH, request).await
    }
}
