//! Member partitions for the public and admin member pages

use crate::models::Member;

/// Members grouped the way the pages show them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberPartition {
    pub active: Vec<Member>,
    pub inactive: Vec<Member>,
    /// Active members whose position matches a leadership keyword
    pub leadership: Vec<Member>,
    /// Active members outside the leadership team
    pub regular: Vec<Member>,
    /// Active members with no profile photo
    pub without_photo: Vec<Member>,
}

/// Partition members. Inactive members appear in neither leadership nor regular.
pub fn partition_members<S: AsRef<str>>(members: &[Member], leadership_roles: &[S]) -> MemberPartition {
    let (active, inactive): (Vec<Member>, Vec<Member>) =
        members.iter().cloned().partition(|member| member.active);

    let (leadership, regular): (Vec<Member>, Vec<Member>) = active
        .iter()
        .cloned()
        .partition(|member| member.holds_any_role(leadership_roles));

    let without_photo = active
        .iter()
        .filter(|member| !member.has_photo())
        .cloned()
        .collect();

    MemberPartition {
        active,
        inactive,
        leadership,
        regular,
        without_photo,
    }
}
