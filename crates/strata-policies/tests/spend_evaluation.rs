//! End-to-end spend evaluation against composed stacks.
//!
//! Mirrors how a ledger would use the crate: fix a stack at resource
//! creation, then evaluate spender-assembled witnesses against it.

use assert_matches::assert_matches;
use ed25519_dalek::Verifier;

use strata_core::{Condition, StrataError};
use strata_policies::{
    compose, AuthorizationPolicy, AuthorizationWitness, CompositeAmountPolicy,
    CompositeAmountWitness, LayerWitness, PassThroughPolicy, PolicyLayer, RateLimitParams,
    RateLimitPolicy, RateLimitWitness, SpendWitness,
};
use strata_testkit::{basic_outputs, init_test_tracing, puzzle_hash, KeyFixture};

fn authorization(fixture: &KeyFixture) -> PolicyLayer {
    PolicyLayer::Authorization(AuthorizationPolicy::new(fixture.signer()))
}

fn authorization_witness(conditions: Vec<Condition>) -> LayerWitness {
    LayerWitness::Authorization(AuthorizationWitness { conditions })
}

#[test]
fn innermost_layer_alone_authorizes_a_spend() {
    init_test_tracing();
    let alice = KeyFixture::from_seed_string("alice");
    let program = compose(vec![authorization(&alice)]).unwrap();

    let proposal = vec![Condition::CreateOutput {
        puzzle_hash: puzzle_hash(0),
        amount: 1000,
    }];
    let witness =
        SpendWitness::assemble(&program, vec![authorization_witness(proposal.clone())]).unwrap();

    let outcome = program.evaluate(&witness).unwrap();
    let conditions = outcome.conditions().expect("spend should be approved");
    assert_eq!(conditions.len(), 2);
    assert_eq!(conditions.as_slice()[0], proposal[0]);

    // The appended requirement is satisfiable by the wallet's signature.
    let Condition::RequireSignature { signer, message } = &conditions.as_slice()[1] else {
        panic!("expected a signature requirement last");
    };
    assert_eq!(*signer, alice.signer());
    let signature = alice.sign_proposal(&proposal);
    alice
        .verifying_key()
        .verify(message.as_bytes(), &signature)
        .expect("signature must cover the spend message");
}

#[test]
fn composite_gate_over_authorization_approves_a_proven_spend() {
    let alice = KeyFixture::from_seed_string("alice");
    let program = compose(vec![
        PolicyLayer::CompositeAmount(CompositeAmountPolicy),
        authorization(&alice),
    ])
    .unwrap();

    let witness = SpendWitness::assemble(
        &program,
        vec![
            LayerWitness::CompositeAmount(CompositeAmountWitness {
                condition_index: 0,
                factor_1: 20,
                factor_2: 50,
            }),
            authorization_witness(basic_outputs()),
        ],
    )
    .unwrap();

    assert!(program.evaluate(&witness).unwrap().is_approved());
}

#[test]
fn composite_gate_rejects_a_trivial_proof() {
    let alice = KeyFixture::from_seed_string("alice");
    let program = compose(vec![
        PolicyLayer::CompositeAmount(CompositeAmountPolicy),
        authorization(&alice),
    ])
    .unwrap();

    let witness = SpendWitness::assemble(
        &program,
        vec![
            LayerWitness::CompositeAmount(CompositeAmountWitness {
                condition_index: 0,
                factor_1: 1,
                factor_2: 1000,
            }),
            authorization_witness(basic_outputs()),
        ],
    )
    .unwrap();

    let outcome = program.evaluate(&witness).unwrap();
    assert_eq!(
        outcome,
        strata_policies::EvalOutcome::Rejected { layer_index: 0 }
    );
}

#[test]
fn pass_through_gate_approves_anything_the_inner_layer_produces() {
    let alice = KeyFixture::from_seed_string("alice");
    let program = compose(vec![
        PolicyLayer::PassThrough(PassThroughPolicy),
        authorization(&alice),
    ])
    .unwrap();

    let witness = SpendWitness::assemble(
        &program,
        vec![
            LayerWitness::PassThrough,
            authorization_witness(basic_outputs()),
        ],
    )
    .unwrap();

    assert!(program.evaluate(&witness).unwrap().is_approved());
}

#[test]
fn rate_limited_change_must_readopt_the_same_stack() {
    init_test_tracing();
    let alice = KeyFixture::from_seed_string("alice");
    let params = RateLimitParams::new(100, 333, 864000).unwrap();
    let rate_limit = RateLimitPolicy::new(params);
    let now = 12345;
    let min_change = rate_limit.params().min_change_amount(now) as u64;

    let auth_policy = AuthorizationPolicy::new(alice.signer());
    let continuation = auth_policy.layer().unwrap().hash();
    let program = compose(vec![
        PolicyLayer::RateLimit(rate_limit),
        authorization(&alice),
    ])
    .unwrap();

    // Change that re-adopts exactly this stack carries the program's own
    // commitment, which is what the validator recomputes from the witness.
    assert_eq!(
        rate_limit.expected_change_commitment(continuation).unwrap(),
        program.commitment()
    );

    let proposal = vec![
        Condition::AssertAbsoluteTime { seconds: now },
        Condition::CreateOutput {
            puzzle_hash: puzzle_hash(9),
            amount: 1007,
        },
        Condition::CreateOutput {
            puzzle_hash: program.commitment(),
            amount: min_change + 1000,
        },
    ];
    let rate_limit_witness = RateLimitWitness {
        now,
        assert_time_index: 0,
        change_output_index: 2,
        change_continuation_index: 0,
        continuation_hashes: vec![continuation],
    };

    let witness = SpendWitness::assemble(
        &program,
        vec![
            LayerWitness::RateLimit(rate_limit_witness.clone()),
            authorization_witness(proposal.clone()),
        ],
    )
    .unwrap();
    assert!(program.evaluate(&witness).unwrap().is_approved());

    // Draining past the schedule rejects at the rate-limit gate.
    let mut drained = proposal;
    drained[2] = Condition::CreateOutput {
        puzzle_hash: program.commitment(),
        amount: min_change - 1,
    };
    let witness = SpendWitness::assemble(
        &program,
        vec![
            LayerWitness::RateLimit(rate_limit_witness),
            authorization_witness(drained),
        ],
    )
    .unwrap();
    assert_eq!(
        program.evaluate(&witness).unwrap(),
        strata_policies::EvalOutcome::Rejected { layer_index: 0 }
    );
}

#[test]
fn evaluation_is_idempotent() {
    let alice = KeyFixture::from_seed_string("alice");
    let program = compose(vec![
        PolicyLayer::CompositeAmount(CompositeAmountPolicy),
        authorization(&alice),
    ])
    .unwrap();

    let witness = SpendWitness::assemble(
        &program,
        vec![
            LayerWitness::CompositeAmount(CompositeAmountWitness {
                condition_index: 0,
                factor_1: 20,
                factor_2: 50,
            }),
            authorization_witness(basic_outputs()),
        ],
    )
    .unwrap();

    let first = program.evaluate(&witness).unwrap();
    let second = program.evaluate(&witness).unwrap();
    assert_eq!(first, second);
}

#[test]
fn witness_list_must_match_stack_length() {
    let alice = KeyFixture::from_seed_string("alice");
    let program = compose(vec![
        PolicyLayer::PassThrough(PassThroughPolicy),
        authorization(&alice),
    ])
    .unwrap();

    assert_matches!(
        SpendWitness::assemble(&program, vec![LayerWitness::PassThrough]),
        Err(StrataError::WitnessLengthMismatch {
            expected: 2,
            actual: 1,
        })
    );
}

#[test]
fn a_gate_cannot_sit_innermost() {
    let program = compose(vec![PolicyLayer::CompositeAmount(CompositeAmountPolicy)]).unwrap();
    let witness = SpendWitness::assemble(
        &program,
        vec![LayerWitness::CompositeAmount(CompositeAmountWitness {
            condition_index: 0,
            factor_1: 2,
            factor_2: 2,
        })],
    )
    .unwrap();

    assert_matches!(
        program.evaluate(&witness),
        Err(StrataError::InnermostNotProducer { .. })
    );
}

#[test]
fn a_producer_cannot_sit_outside_the_innermost_position() {
    let alice = KeyFixture::from_seed_string("alice");
    let bob = KeyFixture::from_seed_string("bob");
    let program = compose(vec![authorization(&bob), authorization(&alice)]).unwrap();

    let witness = SpendWitness::assemble(
        &program,
        vec![
            authorization_witness(vec![]),
            authorization_witness(basic_outputs()),
        ],
    )
    .unwrap();

    assert_matches!(
        program.evaluate(&witness),
        Err(StrataError::ProducerNotInnermost { layer_index: 0, .. })
    );
}

#[test]
fn swapped_witness_entries_are_fatal_not_rejected() {
    let alice = KeyFixture::from_seed_string("alice");
    let program = compose(vec![
        PolicyLayer::CompositeAmount(CompositeAmountPolicy),
        authorization(&alice),
    ])
    .unwrap();

    let witness = SpendWitness::assemble(
        &program,
        vec![
            authorization_witness(basic_outputs()),
            LayerWitness::CompositeAmount(CompositeAmountWitness {
                condition_index: 0,
                factor_1: 20,
                factor_2: 50,
            }),
        ],
    )
    .unwrap();

    assert_matches!(
        program.evaluate(&witness),
        Err(StrataError::WitnessKindMismatch { .. })
    );
}

#[test]
fn commitments_distinguish_every_stack_arrangement() {
    let alice = KeyFixture::from_seed_string("alice");
    let bob = KeyFixture::from_seed_string("bob");

    let programs = [
        compose(vec![authorization(&alice)]).unwrap(),
        compose(vec![authorization(&bob)]).unwrap(),
        compose(vec![
            PolicyLayer::CompositeAmount(CompositeAmountPolicy),
            authorization(&alice),
        ])
        .unwrap(),
        compose(vec![
            PolicyLayer::PassThrough(PassThroughPolicy),
            authorization(&alice),
        ])
        .unwrap(),
        compose(vec![
            PolicyLayer::PassThrough(PassThroughPolicy),
            PolicyLayer::CompositeAmount(CompositeAmountPolicy),
            authorization(&alice),
        ])
        .unwrap(),
        compose(vec![
            PolicyLayer::CompositeAmount(CompositeAmountPolicy),
            PolicyLayer::PassThrough(PassThroughPolicy),
            authorization(&alice),
        ])
        .unwrap(),
    ];

    for (i, a) in programs.iter().enumerate() {
        for b in &programs[i + 1..] {
            assert_ne!(a.commitment(), b.commitment());
        }
    }
}
