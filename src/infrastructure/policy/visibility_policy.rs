use crate::application::ports::NamespacePolicy;
use crate::domain::authorization::UserContext;
use crate::domain::value_objects::{NamespaceRef, Visibility};

/// Namespace visibility rules.
///
/// Administrators see every namespace. Public and protected namespaces are
/// open to any authenticated user; private ones only to their members.
#[derive(Debug, Default, Clone, Copy)]
pub struct VisibilityPolicy;

impl NamespacePolicy for VisibilityPolicy {
    fn can_view(&self, user: &UserContext, namespace: &NamespaceRef) -> bool {
        if user.is_admin() {
            return true;
        }

        match namespace.visibility() {
            Visibility::Public | Visibility::Protected => true,
            Visibility::Private => user.is_member_of(namespace.id()),
        }
    }
}
