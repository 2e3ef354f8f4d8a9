use engine::{EngineError, GroupDraft, Money, Quantity, Session};
use proptest::prelude::*;

fn session() -> Session {
    let mut session = Session::new();
    session
        .create_group(&GroupDraft {
            name: "Team lunch".to_string(),
            place: "Canteen".to_string(),
            payers: vec!["Alice".to_string(), "Bob".to_string()],
            date: "2024-03-01".to_string(),
        })
        .unwrap();
    session
}

fn units(n: i64) -> Quantity {
    Quantity::from_units(n)
}

fn assert_conserved(session: &Session) {
    for expense in session.items() {
        let claimed: Quantity = session
            .claims()
            .iter()
            .filter(|claim| claim.item() == expense.item())
            .map(|claim| claim.quantity())
            .sum();
        assert!(
            claimed <= expense.quantity(),
            "{} over-allocated: {claimed} > {}",
            expense.item(),
            expense.quantity()
        );
    }
}

#[test]
fn rice_walkthrough() {
    let mut session = session();
    let price = Money::new(200);

    // 1. add item and a first claim
    session.add_item("Rice", units(10), price).unwrap();
    assert_eq!(session.ledger_total(), Money::new(2000));
    session.add_claim("A", "Rice", units(6), price).unwrap();
    assert_eq!(session.available_quantity("Rice", None), units(4));

    // 2. over-allocation
    assert_eq!(
        session.add_claim("B", "Rice", units(5), price).unwrap_err(),
        EngineError::OverAllocation {
            item: "Rice".to_string(),
            requested: units(5),
            available: units(4),
        }
    );
    assert_eq!(session.claims().len(), 1);

    // 3. shrinking below the claimed floor
    let err = session.update_item("Rice", units(5), price).unwrap_err();
    assert_eq!(
        err,
        EngineError::QuantityBelowAllocated {
            item: "Rice".to_string(),
            used: units(6),
        }
    );
    assert!(err.to_string().contains("below 6"));
    assert_eq!(session.items()[0].quantity(), units(10));

    // 4. releasing the claim frees the quantity
    let removed = session.delete_claim(0).unwrap();
    assert_eq!(removed.member(), "A");
    assert_eq!(session.available_quantity("Rice", None), units(10));
    session.update_item("Rice", units(5), price).unwrap();

    // 5. a claimed item can't be deleted
    session.add_claim("B", "Rice", units(4), price).unwrap();
    assert_eq!(
        session.delete_item("Rice").unwrap_err(),
        EngineError::ItemInUse("Rice".to_string())
    );
    assert_eq!(session.items().len(), 1);

    // 6. duplicate key
    assert_eq!(
        session.add_item("Rice", units(1), price).unwrap_err(),
        EngineError::DuplicateItem("Rice".to_string())
    );
    assert_eq!(session.items()[0].quantity(), units(5));
}

#[test]
fn item_can_be_deleted_after_its_claims() {
    let mut session = session();
    session.add_item("Rice", units(10), Money::new(200)).unwrap();
    session
        .add_claim("A", "Rice", units(1), Money::new(200))
        .unwrap();
    assert!(session.delete_item("Rice").is_err());

    session.delete_claim(0);
    let removed = session.delete_item("Rice").unwrap();
    assert_eq!(removed.item(), "Rice");
    assert!(session.items().is_empty());
}

#[test]
fn deleting_the_same_index_twice_is_a_no_op() {
    let mut session = session();
    session.add_item("Rice", units(10), Money::new(200)).unwrap();
    session.add_claim("A", "Rice", units(2), Money::new(200)).unwrap();
    session.add_claim("B", "Rice", units(3), Money::new(200)).unwrap();

    assert!(session.delete_claim(1).is_some());
    assert!(session.delete_claim(1).is_none());
    assert_eq!(session.claims().len(), 1);
    assert_eq!(session.claims()[0].member(), "A");
    assert_eq!(session.claims()[0].quantity(), units(2));
}

#[test]
fn edited_claim_gets_its_own_reservation_back() {
    let mut session = session();
    let price = Money::new(100);
    session.add_item("Tea", units(10), price).unwrap();
    session.add_claim("A", "Tea", units(3), price).unwrap();
    session.add_claim("B", "Tea", units(5), price).unwrap();

    // headroom is 2, A holds 3
    let max = units(5);
    let one_more = Quantity::from_hundredths(max.hundredths() + 1);
    assert_eq!(
        session
            .update_claim(0, "A", "Tea", one_more, price)
            .unwrap_err(),
        EngineError::OverAllocation {
            item: "Tea".to_string(),
            requested: one_more,
            available: max,
        }
    );
    session.update_claim(0, "A", "Tea", max, price).unwrap();
    assert_eq!(session.available_quantity("Tea", None), Quantity::ZERO);
    assert_eq!(session.available_quantity("Tea", Some(0)), max);
}

#[test]
fn fractional_quantities_fill_an_item_exactly() {
    let mut session = session();
    let price: Money = "0.10".parse().unwrap();
    session.add_item("Milk", "0.3".parse().unwrap(), price).unwrap();
    for member in ["A", "B", "C"] {
        session
            .add_claim(member, "Milk", "0.1".parse().unwrap(), price)
            .unwrap();
    }
    assert_eq!(session.available_quantity("Milk", None), Quantity::ZERO);
    assert!(
        session
            .add_claim("D", "Milk", "0.01".parse().unwrap(), price)
            .is_err()
    );
}

const ITEMS: [&str; 3] = ["Rice", "Tea", "Bread"];

#[derive(Clone, Debug)]
enum Op {
    AddClaim { item: usize, hundredths: i64 },
    UpdateClaim { index: usize, item: usize, hundredths: i64 },
    DeleteClaim { index: usize },
    UpdateItem { item: usize, hundredths: i64 },
}

fn op() -> impl Strategy<Value = Op> {
    let item = 0..ITEMS.len();
    prop_oneof![
        2 => (item.clone(), 0i64..400)
            .prop_map(|(item, hundredths)| Op::AddClaim { item, hundredths }),
        1 => (0usize..8, item.clone(), 0i64..400)
            .prop_map(|(index, item, hundredths)| Op::UpdateClaim { index, item, hundredths }),
        1 => (0usize..8).prop_map(|index| Op::DeleteClaim { index }),
        1 => (item, 0i64..900)
            .prop_map(|(item, hundredths)| Op::UpdateItem { item, hundredths }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn conservation_holds_across_mixed_operations(ops in prop::collection::vec(op(), 1..120)) {
        let mut session = session();
        let price = Money::new(100);
        for (i, item) in ITEMS.iter().enumerate() {
            session.add_item(item, units(5 + i as i64), price).unwrap();
        }

        for op in ops {
            let items_before = session.items().to_vec();
            let claims_before = session.claims().to_vec();
            let rejected = match op {
                Op::AddClaim { item, hundredths } => session
                    .add_claim("M", ITEMS[item], Quantity::from_hundredths(hundredths), price)
                    .is_err(),
                Op::UpdateClaim { index, item, hundredths } => session
                    .update_claim(index, "M", ITEMS[item], Quantity::from_hundredths(hundredths), price)
                    .is_err(),
                Op::DeleteClaim { index } => session.delete_claim(index).is_none(),
                Op::UpdateItem { item, hundredths } => session
                    .update_item(ITEMS[item], Quantity::from_hundredths(hundredths), price)
                    .is_err(),
            };
            if rejected {
                prop_assert_eq!(session.claims(), claims_before.as_slice());
                prop_assert_eq!(session.items(), items_before.as_slice());
            }
            assert_conserved(&session);
        }
    }
}
