//! Role → feature → action permission matrix.

use std::fmt;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::Role;

/// Permission-gated application feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Products,
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Products => write!(f, "products"),
        }
    }
}

/// Action on a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::View => write!(f, "view"),
            Self::Create => write!(f, "create"),
            Self::Edit => write!(f, "edit"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Whether `role` may perform `action` on `feature`.
///
/// Admins get every product action, users may view and create, guests get
/// nothing.
pub fn can(role: Role, feature: Feature, action: Action) -> bool {
    match (role, feature) {
        (Role::Admin, Feature::Products) => true,
        (Role::User, Feature::Products) => matches!(action, Action::View | Action::Create),
        (Role::Guest, _) => false,
    }
}

/// `can`, as a guard returning `PermissionDenied`.
pub fn ensure(role: Role, feature: Feature, action: Action) -> DomainResult<()> {
    if can(role, feature, action) {
        Ok(())
    } else {
        Err(DomainError::PermissionDenied(format!(
            "{role} may not {action} {feature}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_has_every_product_action() {
        for action in [Action::View, Action::Create, Action::Edit, Action::Delete] {
            assert!(can(Role::Admin, Feature::Products, action));
        }
    }

    #[test]
    fn test_user_may_view_and_create_only() {
        assert!(can(Role::User, Feature::Products, Action::View));
        assert!(can(Role::User, Feature::Products, Action::Create));
        assert!(!can(Role::User, Feature::Products, Action::Edit));
        assert!(!can(Role::User, Feature::Products, Action::Delete));
    }

    #[test]
    fn test_guest_gets_nothing() {
        assert!(!can(Role::Guest, Feature::Products, Action::View));
    }

    #[test]
    fn test_ensure_maps_to_permission_denied() {
        let err = ensure(Role::Guest, Feature::Products, Action::View).unwrap_err();
        assert!(matches!(err, DomainError::PermissionDenied(_)));
    }
}
