use anchor_lang::prelude::*;

use crate::constants::{MAX_GROUPS, MAX_GROUP_INVITES, MAX_GROUP_MEMBERS, NO_GROUP};
use crate::errors::PrizePoolErrorCode;
use crate::state::entry_ledger::EntryLedger;

/// A set of participants sharing the prize of any draw one of them wins.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Group {
    /// Sequential id, equal to the group's position in the registry.
    pub id: u32,

    /// Members in join order. The creator is first.
    pub members: Vec<Pubkey>,

    /// Invited and not yet joined.
    pub allowed_entrants: Vec<Pubkey>,
}

impl Group {
    pub const SIZE: usize =
        4 + // id
            4 + (32 * MAX_GROUP_MEMBERS) + // members
            4 + (32 * MAX_GROUP_INVITES);  // allowed_entrants

    pub fn is_member(&self, key: &Pubkey) -> bool {
        self.members.contains(key)
    }

    pub fn is_invited(&self, key: &Pubkey) -> bool {
        self.allowed_entrants.contains(key)
    }

    /// A group whose last member left. Its id stays allocated.
    pub fn is_dissolved(&self) -> bool {
        self.members.is_empty()
    }
}

/// ---------------------------------------------------------------------------
/// GroupRegistry
/// ---------------------------------------------------------------------------
///
/// All groups ever created. Ids are indices into `groups` and are never reused.
///
/// State machine per participant:
///   Solo --create--> first member
///   Solo --join----> member (requires a prior invite)
///   member --leave--> Solo
///
/// Membership is mirrored in `Entry.group_id`; both sides are always written
/// together.
#[account]
pub struct GroupRegistry {
    pub groups: Vec<Group>,
    pub bump: u8,
    pub _reserved: [u8; 16],
}

impl GroupRegistry {
    pub const SEED: &'static [u8] = b"group_registry";

    pub const SIZE: usize =
        4 + (Group::SIZE * MAX_GROUPS) + // groups
            1 +  // bump
            16;  // reserved

    pub fn group(&self, group_id: u32) -> Result<&Group> {
        self.groups
            .get(group_id as usize)
            .ok_or_else(|| error!(PrizePoolErrorCode::UnknownGroup))
    }

    /// Group an entry's `group_id` points at, if any.
    pub fn group_of_entry(&self, group_id: i64) -> Result<Option<&Group>> {
        if group_id == NO_GROUP {
            return Ok(None);
        }
        let id = u32::try_from(group_id).map_err(|_| error!(PrizePoolErrorCode::UnknownGroup))?;
        self.group(id).map(Some)
    }

    /// `createGroup`: the participant becomes the sole member of a new group.
    pub fn create_group(&mut self, ledger: &mut EntryLedger, participant: &Pubkey) -> Result<u32> {
        let index = ledger.require_index(participant)?;
        require!(
            !ledger.entries[index].is_grouped(),
            PrizePoolErrorCode::AlreadyGrouped
        );
        require!(
            self.groups.len() < MAX_GROUPS,
            PrizePoolErrorCode::GroupRegistryFull
        );

        let id = self.groups.len() as u32;
        self.groups.push(Group {
            id,
            members: vec![*participant],
            allowed_entrants: Vec::new(),
        });
        ledger.entries[index].group_id = id as i64;
        Ok(id)
    }

    /// `invite`: adds the holder of `username` to the inviter's allowed entrants.
    ///
    /// Repeating an invite, or inviting an existing member, changes nothing.
    /// Returns the group id and the invitee's key.
    pub fn invite(
        &mut self,
        ledger: &EntryLedger,
        inviter: &Pubkey,
        username: &str,
    ) -> Result<(u32, Pubkey)> {
        let inviter_index = ledger.require_index(inviter)?;
        let group_id = ledger.entries[inviter_index].group_id;
        require!(group_id != NO_GROUP, PrizePoolErrorCode::NotGrouped);

        let invitee_index = ledger
            .index_of_username(username)
            .ok_or(PrizePoolErrorCode::UnknownUsername)?;
        let invitee = ledger.entries[invitee_index].owner;

        let id = u32::try_from(group_id).map_err(|_| error!(PrizePoolErrorCode::UnknownGroup))?;
        let group = self
            .groups
            .get_mut(id as usize)
            .ok_or(PrizePoolErrorCode::UnknownGroup)?;

        if group.is_member(&invitee) || group.is_invited(&invitee) {
            return Ok((id, invitee));
        }
        if group.allowed_entrants.len() >= MAX_GROUP_INVITES {
            // Invitees that left the ledger or joined a group can no longer join this one.
            group
                .allowed_entrants
                .retain(|k| ledger.entry(k).map_or(false, |e| !e.is_grouped()));
        }
        require!(
            group.allowed_entrants.len() < MAX_GROUP_INVITES,
            PrizePoolErrorCode::GroupFull
        );

        group.allowed_entrants.push(invitee);
        Ok((id, invitee))
    }

    /// Withdraws a pending invite for the holder of `username`. Any member of
    /// the group may revoke. Revoking someone not invited changes nothing.
    pub fn revoke_invite(
        &mut self,
        ledger: &EntryLedger,
        member: &Pubkey,
        username: &str,
    ) -> Result<(u32, Pubkey)> {
        let member_index = ledger.require_index(member)?;
        let group_id = ledger.entries[member_index].group_id;
        require!(group_id != NO_GROUP, PrizePoolErrorCode::NotGrouped);

        let invitee_index = ledger
            .index_of_username(username)
            .ok_or(PrizePoolErrorCode::UnknownUsername)?;
        let invitee = ledger.entries[invitee_index].owner;

        let id = u32::try_from(group_id).map_err(|_| error!(PrizePoolErrorCode::UnknownGroup))?;
        let group = self
            .groups
            .get_mut(id as usize)
            .ok_or(PrizePoolErrorCode::UnknownGroup)?;

        group.allowed_entrants.retain(|k| *k != invitee);
        Ok((id, invitee))
    }

    /// `joinGroup`: moves an invited participant from allowed entrants to members.
    pub fn join_group(
        &mut self,
        ledger: &mut EntryLedger,
        participant: &Pubkey,
        group_id: u32,
    ) -> Result<()> {
        let group = self
            .groups
            .get_mut(group_id as usize)
            .ok_or(PrizePoolErrorCode::UnknownGroup)?;
        require!(!group.is_dissolved(), PrizePoolErrorCode::GroupDissolved);

        let index = ledger.require_index(participant)?;
        require!(
            !ledger.entries[index].is_grouped(),
            PrizePoolErrorCode::AlreadyGrouped
        );
        require!(group.is_invited(participant), PrizePoolErrorCode::NotInvited);
        require!(
            group.members.len() < MAX_GROUP_MEMBERS,
            PrizePoolErrorCode::GroupFull
        );

        group.allowed_entrants.retain(|k| k != participant);
        group.members.push(*participant);
        ledger.entries[index].group_id = group_id as i64;
        Ok(())
    }

    /// `leaveGroup`: the participant goes back to solo. Returns the group left.
    ///
    /// When the last member leaves the group is dissolved and its pending
    /// invites are dropped.
    pub fn leave_group(&mut self, ledger: &mut EntryLedger, participant: &Pubkey) -> Result<u32> {
        let index = ledger.require_index(participant)?;
        let group_id = ledger.entries[index].group_id;
        require!(group_id != NO_GROUP, PrizePoolErrorCode::NotGrouped);

        let id = u32::try_from(group_id).map_err(|_| error!(PrizePoolErrorCode::UnknownGroup))?;
        let group = self
            .groups
            .get_mut(id as usize)
            .ok_or(PrizePoolErrorCode::UnknownGroup)?;
        require!(group.is_member(participant), PrizePoolErrorCode::AssertInvariantFailed);

        group.members.retain(|k| k != participant);
        if group.is_dissolved() {
            group.allowed_entrants.clear();
        }
        ledger.entries[index].group_id = NO_GROUP;
        Ok(id)
    }

    /// True when membership and `Entry.group_id` agree everywhere and no key is
    /// both a member and an allowed entrant.
    pub fn is_consistent(&self, ledger: &EntryLedger) -> bool {
        for group in &self.groups {
            for member in &group.members {
                if group.is_invited(member) {
                    return false;
                }
                match ledger.entry(member) {
                    Some(entry) if entry.group_id == group.id as i64 => {}
                    _ => return false,
                }
            }
        }

        ledger.entries.iter().all(|entry| {
            if entry.group_id == NO_GROUP {
                return self.groups.iter().all(|g| !g.is_member(&entry.owner));
            }
            self.groups
                .iter()
                .filter(|g| g.is_member(&entry.owner))
                .count()
                == 1
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::{empty_ledger, empty_registry, expect_code};

    fn named(ledger: &mut EntryLedger, name: &str) -> Pubkey {
        let key = Pubkey::new_unique();
        ledger.set_username(key, name).unwrap();
        key
    }

    #[test]
    fn group_registry_size_matches_serialization() {
        let mut registry = empty_registry();
        for id in 0..MAX_GROUPS {
            registry.groups.push(Group {
                id: id as u32,
                members: (0..MAX_GROUP_MEMBERS).map(|_| Pubkey::new_unique()).collect(),
                allowed_entrants: (0..MAX_GROUP_INVITES).map(|_| Pubkey::new_unique()).collect(),
            });
        }

        let mut bytes = Vec::new();
        registry.serialize(&mut bytes).unwrap();
        assert_eq!(bytes.len(), GroupRegistry::SIZE);
    }

    #[test]
    fn create_invite_join_flow() {
        let mut ledger = empty_ledger();
        let mut registry = empty_registry();
        let alice = named(&mut ledger, "alice");
        let bob = named(&mut ledger, "bob");

        let id = registry.create_group(&mut ledger, &alice).unwrap();
        assert_eq!(id, 0);
        assert_eq!(ledger.entry(&alice).unwrap().group_id, 0);

        assert_eq!(registry.invite(&ledger, &alice, "bob").unwrap(), (0, bob));
        assert!(registry.group(0).unwrap().is_invited(&bob));

        registry.join_group(&mut ledger, &bob, 0).unwrap();
        let group = registry.group(0).unwrap();
        assert_eq!(group.members, vec![alice, bob]);
        assert!(group.allowed_entrants.is_empty());
        assert_eq!(ledger.entry(&bob).unwrap().group_id, 0);
        assert!(registry.is_consistent(&ledger));
    }

    #[test]
    fn create_requires_entry_and_solo() {
        let mut ledger = empty_ledger();
        let mut registry = empty_registry();
        let alice = named(&mut ledger, "alice");

        expect_code(
            registry.create_group(&mut ledger, &Pubkey::new_unique()),
            PrizePoolErrorCode::NoEntry,
        );
        registry.create_group(&mut ledger, &alice).unwrap();
        expect_code(
            registry.create_group(&mut ledger, &alice),
            PrizePoolErrorCode::AlreadyGrouped,
        );
    }

    #[test]
    fn invite_errors_and_idempotence() {
        let mut ledger = empty_ledger();
        let mut registry = empty_registry();
        let alice = named(&mut ledger, "alice");
        named(&mut ledger, "bob");

        expect_code(
            registry.invite(&ledger, &alice, "bob"),
            PrizePoolErrorCode::NotGrouped,
        );
        registry.create_group(&mut ledger, &alice).unwrap();
        expect_code(
            registry.invite(&ledger, &alice, "carol"),
            PrizePoolErrorCode::UnknownUsername,
        );

        registry.invite(&ledger, &alice, "bob").unwrap();
        registry.invite(&ledger, &alice, "bob").unwrap();
        assert_eq!(registry.group(0).unwrap().allowed_entrants.len(), 1);

        // Inviting an existing member is a no-op.
        registry.invite(&ledger, &alice, "alice").unwrap();
        assert!(!registry.group(0).unwrap().is_invited(&alice));
    }

    #[test]
    fn full_invite_list_drops_invitees_grouped_elsewhere() {
        let mut ledger = empty_ledger();
        let mut registry = empty_registry();
        let alice = named(&mut ledger, "alice");
        let zed = named(&mut ledger, "zed");
        registry.create_group(&mut ledger, &alice).unwrap();
        registry.create_group(&mut ledger, &zed).unwrap();

        let mut invitees = Vec::new();
        for i in 0..MAX_GROUP_INVITES {
            let name = format!("guest{i}");
            invitees.push(named(&mut ledger, &name));
            registry.invite(&ledger, &alice, &name).unwrap();
        }
        named(&mut ledger, "late");
        expect_code(
            registry.invite(&ledger, &alice, "late"),
            PrizePoolErrorCode::GroupFull,
        );

        // guest0 goes to zed's group instead; its seat on alice's list frees up.
        registry.invite(&ledger, &zed, "guest0").unwrap();
        registry.join_group(&mut ledger, &invitees[0], 1).unwrap();

        let (_, late) = registry.invite(&ledger, &alice, "late").unwrap();
        let group = registry.group(0).unwrap();
        assert!(group.is_invited(&late));
        assert!(!group.is_invited(&invitees[0]));
        assert_eq!(group.allowed_entrants.len(), MAX_GROUP_INVITES);
        assert!(registry.is_consistent(&ledger));
    }

    #[test]
    fn revoked_invite_cannot_be_used() {
        let mut ledger = empty_ledger();
        let mut registry = empty_registry();
        let alice = named(&mut ledger, "alice");
        let bob = named(&mut ledger, "bob");
        named(&mut ledger, "carol");

        expect_code(
            registry.revoke_invite(&ledger, &alice, "bob"),
            PrizePoolErrorCode::NotGrouped,
        );
        registry.create_group(&mut ledger, &alice).unwrap();
        registry.invite(&ledger, &alice, "bob").unwrap();

        assert_eq!(
            registry.revoke_invite(&ledger, &alice, "bob").unwrap(),
            (0, bob)
        );
        assert!(registry.group(0).unwrap().allowed_entrants.is_empty());
        expect_code(
            registry.join_group(&mut ledger, &bob, 0),
            PrizePoolErrorCode::NotInvited,
        );

        // Not invited: nothing to do.
        registry.revoke_invite(&ledger, &alice, "carol").unwrap();
        expect_code(
            registry.revoke_invite(&ledger, &alice, "dave"),
            PrizePoolErrorCode::UnknownUsername,
        );
    }

    #[test]
    fn join_errors() {
        let mut ledger = empty_ledger();
        let mut registry = empty_registry();
        let alice = named(&mut ledger, "alice");
        let bob = named(&mut ledger, "bob");
        let carol = named(&mut ledger, "carol");

        expect_code(
            registry.join_group(&mut ledger, &bob, 0),
            PrizePoolErrorCode::UnknownGroup,
        );
        registry.create_group(&mut ledger, &alice).unwrap();
        expect_code(
            registry.join_group(&mut ledger, &bob, 0),
            PrizePoolErrorCode::NotInvited,
        );
        expect_code(
            registry.join_group(&mut ledger, &Pubkey::new_unique(), 0),
            PrizePoolErrorCode::NoEntry,
        );

        registry.create_group(&mut ledger, &carol).unwrap();
        registry.invite(&ledger, &alice, "carol").unwrap();
        expect_code(
            registry.join_group(&mut ledger, &carol, 0),
            PrizePoolErrorCode::AlreadyGrouped,
        );
        assert!(registry.is_consistent(&ledger));
    }

    #[test]
    fn leave_returns_to_solo_and_dissolves_empty_group() {
        let mut ledger = empty_ledger();
        let mut registry = empty_registry();
        let alice = named(&mut ledger, "alice");
        let bob = named(&mut ledger, "bob");
        named(&mut ledger, "carol");

        expect_code(
            registry.leave_group(&mut ledger, &alice),
            PrizePoolErrorCode::NotGrouped,
        );

        registry.create_group(&mut ledger, &alice).unwrap();
        registry.invite(&ledger, &alice, "bob").unwrap();
        registry.join_group(&mut ledger, &bob, 0).unwrap();
        registry.invite(&ledger, &alice, "carol").unwrap();

        assert_eq!(registry.leave_group(&mut ledger, &alice).unwrap(), 0);
        assert_eq!(ledger.entry(&alice).unwrap().group_id, NO_GROUP);
        assert_eq!(registry.group(0).unwrap().members, vec![bob]);

        registry.leave_group(&mut ledger, &bob).unwrap();
        let group = registry.group(0).unwrap();
        assert!(group.is_dissolved());
        assert!(group.allowed_entrants.is_empty());
        assert!(registry.is_consistent(&ledger));

        // Dissolved ids are never reused.
        assert_eq!(registry.create_group(&mut ledger, &alice).unwrap(), 1);
        expect_code(
            registry.join_group(&mut ledger, &bob, 0),
            PrizePoolErrorCode::GroupDissolved,
        );
    }

    #[test]
    fn group_member_cap_is_enforced() {
        let mut ledger = empty_ledger();
        let mut registry = empty_registry();
        let owner = named(&mut ledger, "owner");
        registry.create_group(&mut ledger, &owner).unwrap();

        for i in 1..MAX_GROUP_MEMBERS {
            let name = format!("member{i}");
            let key = named(&mut ledger, &name);
            registry.invite(&ledger, &owner, &name).unwrap();
            registry.join_group(&mut ledger, &key, 0).unwrap();
        }

        let late = named(&mut ledger, "late");
        registry.invite(&ledger, &owner, "late").unwrap();
        expect_code(
            registry.join_group(&mut ledger, &late, 0),
            PrizePoolErrorCode::GroupFull,
        );
        assert!(registry.is_consistent(&ledger));
    }
}
