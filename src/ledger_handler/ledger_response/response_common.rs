use strum_macros::Display;

pub(crate) trait JSONBodyLedgerResponseType: LedgerResponseType {
    async fn parse_json_body(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError>
    where Self::ParsedResponseType: for<'de> serde::Deserialize<'de> {
        Ok(response.json::<Self::ParsedResponseType>().await?)
    }
}

/// Marker for response types that are plain serde JSON bodies; pulls in the
/// blanket `LedgerResponseType` implementation below.
pub(crate) trait SerdeJSONBodyLedgerResponseType {}

impl<T> JSONBodyLedgerResponseType for T
where
    T: SerdeJSONBodyLedgerResponseType,
    for<'de> T: serde::Deserialize<'de>,
{
}

impl<T> LedgerResponseType for T
where
    T: SerdeJSONBodyLedgerResponseType,
    for<'de> T: serde::Deserialize<'de>,
{
    type ParsedResponseType = T;

    async fn read_response(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError> {
        let resp = Self::unwrap_return_code(response).await?;
        Self::parse_json_body(resp).await
    }
}

pub(crate) trait LedgerResponseType {
    type ParsedResponseType;
    async fn read_response(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError>;

    async fn unwrap_return_code(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ResponseError> {
        if response.status().is_success() {
            Ok(response)
        } else if response.status() == reqwest::StatusCode::NOT_FOUND {
            Err(ResponseError::NotFound)
        } else if response.status().is_server_error() {
            Err(ResponseError::InternalServer)
        } else if response.status().is_client_error() {
            Err(ResponseError::Rejected(response.json().await?))
        } else {
            Err(ResponseError::Unknown)
        }
    }
}

/// Body the ledger returns alongside a 4xx status when its own validation
/// refuses a call.
#[derive(Debug, serde::Deserialize)]
pub struct RejectionBody {
    reason: String,
}

impl RejectionBody {
    pub fn reason(&self) -> &str { self.reason.as_str() }
}

#[derive(Debug, Display)]
pub enum ResponseError {
    InternalServer,
    Rejected(RejectionBody),
    NotFound,
    NoConnection,
    Unknown,
}

impl std::error::Error for ResponseError {}
impl From<reqwest::Error> for ResponseError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() || value.is_redirect() {
            ResponseError::InternalServer
        } else if value.is_connect() {
            ResponseError::NoConnection
        } else {
            ResponseError::Unknown
        }
    }
}
