//! Demo data seeding.
//!
//! Seeds one identity owning two short links so a fresh process has
//! something to log in with and redirect through. Safe to run repeatedly:
//! entries that already exist are left alone.

use tracing::info;

use crate::domain::{Error, IdentityService, LinkDirectory, UserId};

/// Id of the seeded identity.
pub const DEMO_USER_ID: &str = "admin";
/// Login email of the seeded identity.
pub const DEMO_EMAIL: &str = "a@a.com";
/// Password of the seeded identity.
pub const DEMO_PASSWORD: &str = "123";
/// Links owned by the seeded identity.
pub const DEMO_LINKS: [(&str, &str); 2] = [
    ("b2xVn2", "http://www.lighthouselabs.ca"),
    ("9sm5xK", "http://www.google.com"),
];

/// What a seeding run actually wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DemoSeedOutcome {
    /// Whether the demo identity was created by this run.
    pub identity_created: bool,
    /// Number of demo links created by this run.
    pub links_created: usize,
}

/// Insert the demo identity and links that are not present yet.
///
/// # Errors
/// Returns the domain error when the demo email already belongs to another
/// identity or when hashing fails.
pub async fn seed_demo_data(
    identities: &IdentityService,
    links: &LinkDirectory,
) -> Result<DemoSeedOutcome, Error> {
    let owner = UserId::new(DEMO_USER_ID)
        .map_err(|err| Error::internal(format!("demo user id is invalid: {err}")))?;
    let mut outcome = DemoSeedOutcome::default();

    if identities.find(&owner).await.is_none() {
        identities
            .register_with_id(owner.clone(), DEMO_EMAIL, DEMO_PASSWORD)
            .await?;
        outcome.identity_created = true;
    }

    for (short_id, long_url) in DEMO_LINKS {
        if links.insert_with_id(short_id, long_url, &owner).await? {
            outcome.links_created += 1;
        }
    }

    info!(
        identity_created = outcome.identity_created,
        links_created = outcome.links_created,
        "demo data seeded"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::test_support::harness;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn seeds_login_and_links() {
        let h = harness();
        let outcome = seed_demo_data(&h.identities, &h.links).await.expect("seed");
        assert_eq!(
            outcome,
            DemoSeedOutcome {
                identity_created: true,
                links_created: 2
            }
        );

        let admin = h
            .identities
            .authenticate(DEMO_EMAIL, DEMO_PASSWORD)
            .await
            .expect("demo login");
        assert_eq!(admin.id().as_ref(), DEMO_USER_ID);
        assert_eq!(
            h.links.resolve_redirect("9sm5xK").await.expect("redirect").as_ref(),
            "http://www.google.com"
        );
        assert_eq!(h.links.list_by_owner(admin.id()).await.len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn second_run_writes_nothing() {
        let h = harness();
        seed_demo_data(&h.identities, &h.links).await.expect("first");
        let outcome = seed_demo_data(&h.identities, &h.links).await.expect("second");
        assert_eq!(outcome, DemoSeedOutcome::default());
        assert_eq!(h.registry.len(), 1);
        assert_eq!(h.store.len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn demo_email_owned_elsewhere_is_reported() {
        let h = harness();
        h.identities.register(DEMO_EMAIL, "other").await.expect("register");
        let err = seed_demo_data(&h.identities, &h.links)
            .await
            .expect_err("email taken");
        assert_eq!(err.code(), ErrorCode::DuplicateEmail);
    }
}
