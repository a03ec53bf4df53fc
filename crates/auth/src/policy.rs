//! The authorization policy: one pure decision per gated action.
//!
//! Every rule is a conjunction of role membership, permission membership and
//! ownership checks; any unmet condition denies with a generic error so the
//! caller never learns which condition failed.

use thiserror::Error;

use jobboard_core::UserId;

use crate::{permissions, roles, Principal, Role};

/// A gated action, together with the resource facts the rule needs.
///
/// Ownership is passed in as plain ids rather than whole resources: the
/// policy reads state, it never loads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action<'a> {
    CreateJob,
    UpdateJob { owner: UserId },
    DeleteJob { owner: UserId },
    ListJobs,
    CreateApplication,
    DeleteApplication { applicant: UserId },
    ListEmployerApplications,
    ListUsers,
    ShowUser,
    CreateUser,
    UpdateUser,
    DeleteUser { target_roles: &'a [Role] },
    AssignRoles,
    GrantPermissions,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// The policy denied the action. Deliberately carries no reason.
    #[error("unauthorized")]
    Forbidden,
}

/// Decide whether `actor` may perform `action`.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
pub fn decide(actor: &Principal, action: &Action<'_>) -> Result<(), PolicyError> {
    let allowed = match action {
        Action::CreateJob => actor.has_permission(permissions::CREATE_JOBS),

        Action::UpdateJob { owner } => {
            actor.has_role(roles::EMPLOYER)
                && actor.user_id == *owner
                && actor.has_permission(permissions::UPDATE_JOBS)
        }

        Action::DeleteJob { owner } => {
            actor.has_role(roles::EMPLOYER)
                && actor.user_id == *owner
                && actor.has_permission(permissions::DELETE_JOBS)
        }

        Action::ListJobs => actor.has_role(roles::USER),

        Action::CreateApplication => actor.has_role(roles::USER),

        Action::DeleteApplication { applicant } => {
            actor.has_role(roles::USER) && actor.user_id == *applicant
        }

        Action::ListEmployerApplications => actor.has_role(roles::EMPLOYER),

        Action::ListUsers | Action::ShowUser => actor.has_permission(permissions::VIEW_USERS),

        Action::CreateUser => actor.has_permission(permissions::CREATE_USERS),

        Action::UpdateUser => actor.has_permission(permissions::UPDATE_USERS),

        // A user holding `admin` can never be deleted, not even by another
        // admin.
        Action::DeleteUser { target_roles } => {
            actor.has_permission(permissions::DELETE_USERS)
                && !target_roles.iter().any(|r| r.as_str() == roles::ADMIN)
        }

        Action::AssignRoles | Action::GrantPermissions => {
            actor.has_permission(permissions::ASSIGN_ROLES)
        }
    };

    if allowed {
        Ok(())
    } else {
        Err(PolicyError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Permission;

    fn principal(roles: &[&'static str], perms: &[&'static str]) -> Principal {
        Principal::new(
            UserId::new(),
            roles.iter().map(|r| Role::new(*r)).collect(),
            perms.iter().map(|p| Permission::new(*p)).collect(),
        )
    }

    #[test]
    fn create_job_requires_permission_not_role() {
        let employer_without_perm = principal(&["employer"], &[]);
        assert_eq!(
            decide(&employer_without_perm, &Action::CreateJob),
            Err(PolicyError::Forbidden)
        );

        // The rule is permission-only: any actor holding "create jobs" passes.
        let holder = principal(&[], &["create jobs"]);
        assert!(decide(&holder, &Action::CreateJob).is_ok());
    }

    #[test]
    fn plain_user_cannot_create_job() {
        let user = principal(&["user"], &[]);
        assert_eq!(
            decide(&user, &Action::CreateJob),
            Err(PolicyError::Forbidden)
        );
    }

    #[test]
    fn update_job_requires_role_ownership_and_permission() {
        let actor = principal(&["employer"], &["update jobs"]);
        let own = Action::UpdateJob {
            owner: actor.user_id,
        };
        assert!(decide(&actor, &own).is_ok());

        // Someone else's job: denied regardless of role and permission.
        let foreign = Action::UpdateJob {
            owner: UserId::new(),
        };
        assert_eq!(decide(&actor, &foreign), Err(PolicyError::Forbidden));

        // Own job but missing the permission: denied.
        let no_perm = principal(&["employer"], &[]);
        let own = Action::UpdateJob {
            owner: no_perm.user_id,
        };
        assert_eq!(decide(&no_perm, &own), Err(PolicyError::Forbidden));

        // Own job, permission held, but not an employer: denied.
        let no_role = principal(&["user"], &["update jobs"]);
        let own = Action::UpdateJob {
            owner: no_role.user_id,
        };
        assert_eq!(decide(&no_role, &own), Err(PolicyError::Forbidden));
    }

    #[test]
    fn delete_job_checks_the_same_three_conditions() {
        let actor = principal(&["employer"], &["delete jobs"]);
        assert!(decide(
            &actor,
            &Action::DeleteJob {
                owner: actor.user_id
            }
        )
        .is_ok());

        let owner_without_perm = principal(&["employer"], &[]);
        assert_eq!(
            decide(
                &owner_without_perm,
                &Action::DeleteJob {
                    owner: owner_without_perm.user_id
                }
            ),
            Err(PolicyError::Forbidden)
        );
    }

    #[test]
    fn listing_jobs_is_for_the_user_role() {
        assert!(decide(&principal(&["user"], &[]), &Action::ListJobs).is_ok());
        assert_eq!(
            decide(&principal(&["employer"], &[]), &Action::ListJobs),
            Err(PolicyError::Forbidden)
        );
    }

    #[test]
    fn only_users_may_apply() {
        assert!(decide(&principal(&["user"], &[]), &Action::CreateApplication).is_ok());
        assert_eq!(
            decide(&principal(&[], &[]), &Action::CreateApplication),
            Err(PolicyError::Forbidden)
        );
        assert_eq!(
            decide(&principal(&["employer"], &[]), &Action::CreateApplication),
            Err(PolicyError::Forbidden)
        );
    }

    #[test]
    fn only_the_applicant_may_delete_an_application() {
        let actor = principal(&["user"], &[]);
        assert!(decide(
            &actor,
            &Action::DeleteApplication {
                applicant: actor.user_id
            }
        )
        .is_ok());

        assert_eq!(
            decide(
                &actor,
                &Action::DeleteApplication {
                    applicant: UserId::new()
                }
            ),
            Err(PolicyError::Forbidden)
        );
    }

    #[test]
    fn employer_application_listing_is_role_gated() {
        assert!(decide(
            &principal(&["employer"], &[]),
            &Action::ListEmployerApplications
        )
        .is_ok());
        assert_eq!(
            decide(&principal(&["user"], &[]), &Action::ListEmployerApplications),
            Err(PolicyError::Forbidden)
        );
    }

    #[test]
    fn user_administration_is_permission_gated() {
        let admin = principal(
            &["admin"],
            &[
                "view-users",
                "create-users",
                "update-users",
                "delete-users",
                "assign-roles",
            ],
        );
        assert!(decide(&admin, &Action::ListUsers).is_ok());
        assert!(decide(&admin, &Action::ShowUser).is_ok());
        assert!(decide(&admin, &Action::CreateUser).is_ok());
        assert!(decide(&admin, &Action::UpdateUser).is_ok());
        assert!(decide(&admin, &Action::AssignRoles).is_ok());
        assert!(decide(&admin, &Action::GrantPermissions).is_ok());

        let nobody = principal(&["user"], &[]);
        assert_eq!(decide(&nobody, &Action::ListUsers), Err(PolicyError::Forbidden));
        assert_eq!(
            decide(&nobody, &Action::AssignRoles),
            Err(PolicyError::Forbidden)
        );
    }

    #[test]
    fn admins_are_never_deletable() {
        let admin = principal(&["admin"], &["delete-users"]);
        let target = [Role::new("admin")];
        assert_eq!(
            decide(
                &admin,
                &Action::DeleteUser {
                    target_roles: &target
                }
            ),
            Err(PolicyError::Forbidden)
        );

        // Non-admin targets are deletable with the permission.
        let target = [Role::new("user")];
        assert!(decide(
            &admin,
            &Action::DeleteUser {
                target_roles: &target
            }
        )
        .is_ok());

        // The permission is still required.
        let unprivileged = principal(&["admin"], &[]);
        let target = [Role::new("user")];
        assert_eq!(
            decide(
                &unprivileged,
                &Action::DeleteUser {
                    target_roles: &target
                }
            ),
            Err(PolicyError::Forbidden)
        );
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_roles() -> impl Strategy<Value = Vec<Role>> {
            proptest::collection::vec(
                prop_oneof![
                    Just(Role::new("user")),
                    Just(Role::new("admin")),
                    Just(Role::new("employer")),
                ],
                0..3,
            )
        }

        fn arb_perms() -> impl Strategy<Value = Vec<Permission>> {
            proptest::collection::vec(
                prop_oneof![
                    Just(Permission::new("create jobs")),
                    Just(Permission::new("update jobs")),
                    Just(Permission::new("delete jobs")),
                    Just(Permission::new("delete-users")),
                ],
                0..4,
            )
        }

        proptest! {
            /// Property: job mutation on a foreign job is denied no matter
            /// which roles and permissions the actor has accumulated.
            #[test]
            fn foreign_jobs_are_untouchable(roles in arb_roles(), perms in arb_perms()) {
                let actor = Principal::new(UserId::new(), roles, perms);
                let foreign = UserId::new();

                prop_assert_eq!(
                    decide(&actor, &Action::UpdateJob { owner: foreign }),
                    Err(PolicyError::Forbidden)
                );
                prop_assert_eq!(
                    decide(&actor, &Action::DeleteJob { owner: foreign }),
                    Err(PolicyError::Forbidden)
                );
            }

            /// Property: a target holding `admin` survives every delete
            /// attempt, whatever the actor holds.
            #[test]
            fn admin_targets_survive_deletion(roles in arb_roles(), perms in arb_perms()) {
                let actor = Principal::new(UserId::new(), roles, perms);
                let target = [Role::new("admin"), Role::new("user")];

                prop_assert_eq!(
                    decide(&actor, &Action::DeleteUser { target_roles: &target }),
                    Err(PolicyError::Forbidden)
                );
            }
        }
    }
}
