use crate::domain::authorization::UserContext;
use crate::domain::value_objects::NamespaceRef;

/// Port deciding which namespaces a user may browse
pub trait NamespacePolicy: Send + Sync {
    fn can_view(&self, user: &UserContext, namespace: &NamespaceRef) -> bool;
}
