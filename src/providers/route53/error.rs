use aws_sdk_route53::config::http::HttpResponse;
use aws_sdk_route53::error::{DisplayErrorContext, SdkError};
use aws_sdk_route53::operation::change_resource_record_sets::ChangeResourceRecordSetsError;
use aws_sdk_route53::types::ChangeStatus as SdkChangeStatus;

use crate::core::change::ChangeStatus;
use crate::core::provider::ProviderError;

/// Anything other than `INSYNC`, including values newer than this SDK, is still pending.
pub fn map_status(status: &SdkChangeStatus) -> ChangeStatus {
    match status {
        SdkChangeStatus::Insync => ChangeStatus::Insync,
        _ => ChangeStatus::Pending,
    }
}

/// Route53 reports a delete of an absent record as `InvalidChangeBatch`. That error comes either
/// as a regular `ErrorResponse` or as a bare `<InvalidChangeBatch>` document the SDK leaves
/// unmodeled, in which case only the raw body tells them apart.
pub fn map_change_error(
    record_name: &str,
    err: SdkError<ChangeResourceRecordSetsError, HttpResponse>,
) -> ProviderError {
    let not_found = match err.as_service_error() {
        Some(service) if service.is_invalid_change_batch() => {
            mentions_not_found(&DisplayErrorContext(&err).to_string())
        }
        Some(_) => err
            .raw_response()
            .and_then(|response| response.body().bytes())
            .is_some_and(|body| is_missing_record_batch(&String::from_utf8_lossy(body))),
        None => false,
    };
    if not_found {
        return ProviderError::RecordSetNotFound {
            name: record_name.to_string(),
        };
    }
    ProviderError::api("ChangeResourceRecordSets", err)
}

pub fn missing(operation: &'static str, field: &str) -> ProviderError {
    ProviderError::api(operation, format!("response is missing {field}"))
}

fn mentions_not_found(message: &str) -> bool {
    message.to_ascii_lowercase().contains("not found")
}

fn is_missing_record_batch(body: &str) -> bool {
    body.contains("<InvalidChangeBatch") && mentions_not_found(body)
}
