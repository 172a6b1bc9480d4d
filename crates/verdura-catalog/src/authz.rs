//! Review mutation authorization.

use uuid::Uuid;
use verdura_core::models::user::Requester;

/// May `requester` update or delete the review owned by `owner_id`?
///
/// True for the review's owner and for admins, who bypass ownership.
pub fn can_modify_review(requester: &Requester, owner_id: Uuid) -> bool {
    requester.is_admin() || requester.id == owner_id
}
