use log::{info, warn};

use crate::core::provider::Route53Api;
use crate::core::zone::{Zone, fqdn, normalize_name};
use crate::error::{Error, Result};

/// Finds the hosted zone whose name is exactly `domain`.
///
/// Route53 lists zones in order starting at the requested name, so the first candidate may be
/// an unrelated zone when no exact match exists; only an exact name match is accepted.
pub async fn resolve_zone(api: &dyn Route53Api, domain: &str) -> Result<Zone> {
    let wanted = fqdn(domain);
    let not_found = || Error::NoHostedZoneFound {
        domain: wanted.clone(),
    };

    let candidates = api.list_hosted_zones_by_name(&wanted, 1).await?;
    let Some(candidate) = candidates.into_iter().next() else {
        return Err(not_found());
    };
    if normalize_name(&candidate.name) != normalize_name(&wanted) {
        return Err(not_found());
    }

    let detail = api.get_hosted_zone(&candidate.id).await?;
    if detail.id.is_empty() || detail.nameservers.is_empty() {
        warn!(
            "hosted zone {} for {} has no delegation set, refusing to manage it",
            detail.id, wanted
        );
        return Err(not_found());
    }

    info!("found matching route53 hosted zone: {}", detail.id);

    Ok(Zone::new(&wanted, detail.id, detail.nameservers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::provider::{
        HostedZoneDetail, HostedZoneSummary, MockRoute53Api, ProviderError,
    };
    use crate::test_support::StubRoute53;
    use assert_matches::assert_matches;
    use std::sync::atomic::Ordering;

    const NAMESERVERS: [&str; 2] = ["ns-1.awsdns-01.org", "ns-2.awsdns-02.com"];

    #[tokio::test]
    async fn test_resolve_exact_match() {
        let api = StubRoute53::with_zone("example.com.", "/hostedzone/Z1", &NAMESERVERS);

        let zone = resolve_zone(&api, "example.com").await.unwrap();

        assert_eq!(zone.name(), "example.com.");
        assert_eq!(zone.id(), "/hostedzone/Z1");
        assert_eq!(zone.nameservers(), NAMESERVERS);
    }

    #[tokio::test]
    async fn test_resolve_accepts_dotted_request() {
        let api = StubRoute53::with_zone("example.com.", "/hostedzone/Z1", &NAMESERVERS);
        let zone = resolve_zone(&api, "example.com.").await.unwrap();
        assert_eq!(zone.id(), "/hostedzone/Z1");
    }

    #[tokio::test]
    async fn test_resolve_no_zones() {
        let api = StubRoute53::default();

        let err = resolve_zone(&api, "example.com").await.unwrap_err();

        assert_matches!(err, Error::NoHostedZoneFound { domain } if domain == "example.com.");
        assert_eq!(api.get_zone_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_resolve_rejects_prefix_match() {
        // "example.co." sorts before "example.com.", so Route53 hands back the latter
        let api = StubRoute53::with_zone("example.com.", "/hostedzone/Z1", &NAMESERVERS);

        let err = resolve_zone(&api, "example.co").await.unwrap_err();

        assert_matches!(err, Error::NoHostedZoneFound { .. });
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.get_zone_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_resolve_rejects_parent_zone() {
        let mut api = MockRoute53Api::new();
        api.expect_list_hosted_zones_by_name()
            .withf(|name, max_items| name.to_string() == "dev.example.com." && *max_items == 1)
            .times(1)
            .returning(|_, _| {
                Ok(vec![HostedZoneSummary {
                    id: "/hostedzone/Z1".into(),
                    name: "example.com.".into(),
                }])
            });
        api.expect_get_hosted_zone().never();

        let err = resolve_zone(&api, "dev.example.com").await.unwrap_err();
        assert_matches!(err, Error::NoHostedZoneFound { .. });
    }

    #[tokio::test]
    async fn test_resolve_requires_delegation_set() {
        let mut api = MockRoute53Api::new();
        api.expect_list_hosted_zones_by_name().returning(|_, _| {
            Ok(vec![HostedZoneSummary {
                id: "/hostedzone/Z1".into(),
                name: "internal.example.".into(),
            }])
        });
        api.expect_get_hosted_zone().returning(|_| {
            Ok(HostedZoneDetail {
                id: "/hostedzone/Z1".into(),
                name: "internal.example.".into(),
                nameservers: vec![],
            })
        });

        let err = resolve_zone(&api, "internal.example").await.unwrap_err();
        assert_matches!(err, Error::NoHostedZoneFound { .. });
    }

    #[tokio::test]
    async fn test_resolve_propagates_provider_error() {
        let mut api = MockRoute53Api::new();
        api.expect_list_hosted_zones_by_name()
            .returning(|_, _| Err(ProviderError::api("ListHostedZonesByName", "AccessDenied")));

        let err = resolve_zone(&api, "example.com").await.unwrap_err();
        assert_matches!(
            err,
            Error::Provider(ProviderError::Api { operation: "ListHostedZonesByName", .. })
        );
    }

    #[tokio::test]
    async fn test_resolve_propagates_get_zone_error() {
        let mut api = MockRoute53Api::new();
        api.expect_list_hosted_zones_by_name().returning(|_, _| {
            Ok(vec![HostedZoneSummary {
                id: "/hostedzone/Z1".into(),
                name: "example.com.".into(),
            }])
        });
        api.expect_get_hosted_zone()
            .returning(|_| Err(ProviderError::api("GetHostedZone", "Throttling")));

        let err = resolve_zone(&api, "example.com").await.unwrap_err();
        assert_matches!(
            err,
            Error::Provider(ProviderError::Api { operation: "GetHostedZone", .. })
        );
    }
}
