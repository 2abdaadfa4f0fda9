//! Property tests over random operation sequences.

use chrono::{DateTime, Duration, TimeZone, Utc};
use dao_treasury_runtime::DaoTreasury;
use dao_treasury_types::{
    AccountId, Amount, GovernanceConfig, GovernanceEvent, ProposalDraft, ProposalId,
    ProposalStatus, TreasuryError, VoteChoice,
};
use proptest::prelude::*;
use std::collections::BTreeMap;

const POOL: usize = 6;

#[derive(Clone, Debug)]
enum Op {
    Add(usize),
    Remove(usize),
    Deposit(u64),
    Propose { who: usize, amount: u64 },
    Vote { who: usize, proposal: u64, yes: bool },
    Execute { proposal: u64 },
    Advance(i64),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..POOL).prop_map(Op::Add),
        (0..POOL).prop_map(Op::Remove),
        (0u64..500).prop_map(Op::Deposit),
        ((0..POOL), 0u64..800).prop_map(|(who, amount)| Op::Propose { who, amount }),
        ((0..POOL), 0u64..6, any::<bool>())
            .prop_map(|(who, proposal, yes)| Op::Vote { who, proposal, yes }),
        (0u64..6).prop_map(|proposal| Op::Execute { proposal }),
        (0i64..(3 * 24 * 3600)).prop_map(Op::Advance),
    ]
}

fn member(i: usize) -> AccountId {
    AccountId::new(format!("member-{i}"))
}

fn start() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
}

/// Apply every op, ignoring rejected ones; returns the DAO and the final clock
fn run(ops: &[Op]) -> (DaoTreasury, DateTime<Utc>) {
    let (mut dao, cap) =
        DaoTreasury::create(AccountId::new("admin"), GovernanceConfig::default(), start()).unwrap();
    let mut now = start();

    for op in ops {
        let _ = match op.clone() {
            Op::Add(i) => dao.add_member(&cap, member(i), now).map(|_| ()),
            Op::Remove(i) => dao.remove_member(&cap, &member(i), now).map(|_| ()),
            Op::Deposit(v) => dao
                .deposit_funds(&AccountId::new("donor"), Amount::new(v), now)
                .map(|_| ()),
            Op::Propose { who, amount } => dao
                .create_proposal(
                    &member(who),
                    ProposalDraft::new("p", "", Amount::new(amount), AccountId::new("payee")),
                    now,
                )
                .map(|_| ()),
            Op::Vote { who, proposal, yes } => dao
                .vote_on_proposal(
                    &member(who),
                    ProposalId::new(proposal),
                    VoteChoice::from_bool(yes),
                    now,
                )
                .map(|_| ()),
            Op::Execute { proposal } => dao
                .execute_proposal(&AccountId::new("keeper"), ProposalId::new(proposal), now)
                .map(|_| ()),
            Op::Advance(secs) => {
                now += Duration::seconds(secs);
                Ok(())
            }
        };
    }
    (dao, now)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn membership_never_empties_once_populated(ops in prop::collection::vec(arb_op(), 0..60)) {
        let mut ever_populated = false;
        let (mut dao, cap) =
            DaoTreasury::create(AccountId::new("admin"), GovernanceConfig::default(), start())
                .unwrap();
        for op in ops {
            match op {
                Op::Add(i) => {
                    let _ = dao.add_member(&cap, member(i), start());
                }
                Op::Remove(i) => {
                    let before = dao.get_members().len();
                    let result = dao.remove_member(&cap, &member(i), start());
                    if before == 1 && dao.is_member(&member(i)) {
                        prop_assert_eq!(result, Err(TreasuryError::CannotRemoveLastMember));
                    }
                }
                _ => {}
            }
            ever_populated |= !dao.get_members().is_empty();
            if ever_populated {
                prop_assert!(!dao.get_members().is_empty());
            }
        }
    }

    #[test]
    fn vote_totals_match_distinct_voters(ops in prop::collection::vec(arb_op(), 0..80)) {
        let (dao, _) = run(&ops);
        for raw in 0..dao.get_proposal_count() {
            let proposal = dao.get_proposal(ProposalId::new(raw)).unwrap();
            let cast = proposal.yes_votes + proposal.no_votes;
            prop_assert_eq!(cast, proposal.voters.len() as u64);
        }
    }

    #[test]
    fn each_proposal_pays_out_at_most_once(ops in prop::collection::vec(arb_op(), 0..80)) {
        let (dao, _) = run(&ops);

        let mut payouts: BTreeMap<ProposalId, u32> = BTreeMap::new();
        let mut deposited = 0u64;
        let mut paid = 0u64;
        for record in dao.journal().records() {
            match &record.event {
                GovernanceEvent::ProposalExecuted { proposal_id, amount, .. } => {
                    *payouts.entry(*proposal_id).or_default() += 1;
                    paid += amount.value();
                }
                GovernanceEvent::FundsDeposited { amount, .. } => deposited += amount.value(),
                _ => {}
            }
        }

        prop_assert!(payouts.values().all(|n| *n == 1));
        prop_assert_eq!(dao.get_balance().value(), deposited - paid);
        for id in payouts.keys() {
            prop_assert_eq!(dao.get_proposal(*id).unwrap().status, ProposalStatus::Executed);
        }
    }

    #[test]
    fn terminal_statuses_never_regress(ops in prop::collection::vec(arb_op(), 0..80)) {
        let (dao, _) = run(&ops);
        let mut last: BTreeMap<ProposalId, ProposalStatus> = BTreeMap::new();
        for record in dao.journal().records() {
            let next = match &record.event {
                GovernanceEvent::ProposalFinalized {
                    proposal_id,
                    status,
                    ..
                } => Some((*proposal_id, *status)),
                GovernanceEvent::ProposalExecuted { proposal_id, .. }
                | GovernanceEvent::ExecutionAborted { proposal_id, .. } => {
                    Some((*proposal_id, ProposalStatus::Executed))
                }
                _ => None,
            };
            if let Some((id, status)) = next {
                let previous = last.get(&id).copied().unwrap_or(ProposalStatus::Active);
                prop_assert!(previous.can_transition_to(status), "{:?} -> {:?}", previous, status);
                last.insert(id, status);
            }
        }
    }
}
