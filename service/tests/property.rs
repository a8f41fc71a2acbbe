//! [`Property`] lifecycle scenarios.

use common::Price;
use service::{
    command::{
        self, AcceptOffer, CancelProperty, CreateOffer, CreateProperty,
        CreatePropertyTag, CreatePropertyType, DuplicateProperty,
        SellProperty, UpdateProperty,
    },
    domain::{
        offer, partner,
        property::{self, Changes, State, TransitionError},
        user, Offer, Property,
    },
    infra::Memory,
    query, read, Command as _, Config, Query as _, Service,
};
use uuid::Uuid;

fn service() -> Service<Memory> {
    Service::new(Config::default(), Memory::new())
}

fn price(s: &str) -> Price {
    s.parse().unwrap()
}

fn partner() -> partner::Id {
    Uuid::new_v4().into()
}

fn new_property(name: &str, expected_price: &str) -> CreateProperty {
    CreateProperty {
        initiator_id: Uuid::new_v4().into(),
        name: Some(name.parse().unwrap()),
        description: "Bright house near the park".parse().unwrap(),
        postcode: "1000".parse().unwrap(),
        date_availability: None,
        expected_price: price(expected_price),
        bedrooms: None,
        living_area: 120,
        facades: 4,
        garage: true,
        garden: true,
        garden_area: 30,
        garden_orientation: Some(property::GardenOrientation::South),
        property_type_id: None,
        seller_id: None,
        tag_ids: vec![],
    }
}

async fn make_offer(
    svc: &Service<Memory>,
    property_id: property::Id,
    p: &str,
) -> Offer {
    svc.execute(CreateOffer {
        property_id,
        partner_id: partner(),
        price: price(p),
        validity: None,
    })
    .await
    .unwrap()
}

async fn property(svc: &Service<Memory>, id: property::Id) -> Property {
    svc.execute(query::property::ById::by(id))
        .await
        .unwrap()
        .unwrap()
}

async fn offers(svc: &Service<Memory>, id: property::Id) -> Vec<Offer> {
    svc.execute(query::property::Offers::by(id)).await.unwrap()
}

#[tokio::test]
async fn creates_with_defaults() {
    let svc = service();
    let initiator = user::Id::from(Uuid::new_v4());

    let created = svc
        .execute(CreateProperty {
            initiator_id: initiator,
            name: None,
            ..new_property("Unused", "100000")
        })
        .await
        .unwrap();

    assert_eq!(created.name.to_string(), "New");
    assert_eq!(created.state, State::New);
    assert_eq!(created.bedrooms, property::DEFAULT_BEDROOMS);
    assert_eq!(created.seller_id, initiator);
    assert_eq!(created.selling_price, Price::ZERO);
    assert_eq!(created.buyer_id, None);
    assert!(created.active);
    assert_eq!(
        created.date_availability,
        property::AvailabilityDate::today().add_months(3),
    );
    assert_eq!(created.total_area(), 150);

    assert_eq!(property(&svc, created.id).await, created);
}

#[tokio::test]
async fn refuses_unknown_references() {
    let svc = service();

    let err = svc
        .execute(CreateProperty {
            property_type_id: Some(Uuid::new_v4().into()),
            ..new_property("Villa", "100000")
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_ref(),
        command::create_property::ExecutionError::PropertyTypeNotExists(_),
    ));

    let err = svc
        .execute(CreateProperty {
            tag_ids: vec![Uuid::new_v4().into()],
            ..new_property("Villa", "100000")
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_ref(),
        command::create_property::ExecutionError::PropertyTagNotExists(_),
    ));

    let listed = svc
        .execute(query::properties::List::by(
            read::property::list::Filter::default(),
        ))
        .await
        .unwrap();
    assert!(listed.is_empty(), "nothing is created on failure");
}

#[tokio::test]
async fn accepts_offer_with_cascade() {
    let svc = service();
    let created = svc
        .execute(new_property("Villa", "100000"))
        .await
        .unwrap();
    let low = make_offer(&svc, created.id, "80000").await;
    let best = make_offer(&svc, created.id, "95000").await;
    let mid = make_offer(&svc, created.id, "90000").await;

    let accepted = svc
        .execute(AcceptOffer { offer_id: best.id })
        .await
        .unwrap();
    assert_eq!(accepted.status, Some(offer::Status::Accepted));

    let sold = property(&svc, created.id).await;
    assert_eq!(sold.selling_price, price("95000"));
    assert_eq!(sold.state, State::OfferAccepted);
    assert_eq!(sold.buyer_id, Some(best.partner_id));

    let statuses = offers(&svc, created.id)
        .await
        .into_iter()
        .map(|o| (o.id, o.status))
        .collect::<Vec<_>>();
    assert_eq!(
        statuses,
        [
            (best.id, Some(offer::Status::Accepted)),
            (mid.id, Some(offer::Status::Refused)),
            (low.id, Some(offer::Status::Refused)),
        ],
    );
}

#[tokio::test]
async fn failed_acceptance_changes_nothing() {
    let svc = service();
    let created = svc
        .execute(new_property("Villa", "100000"))
        .await
        .unwrap();
    let cheap = make_offer(&svc, created.id, "89999.99").await;
    let other = make_offer(&svc, created.id, "50000").await;

    let err = svc
        .execute(AcceptOffer { offer_id: cheap.id })
        .await
        .unwrap_err();
    let command::accept_offer::ExecutionError::Price(e) = err.as_ref() else {
        panic!("unexpected error: {err:?}");
    };
    assert_eq!(
        e.to_string(),
        "The selling price must be at least 90% of the expected price! \
         You must reduce the expected price if you want to accept this offer.",
    );

    assert_eq!(property(&svc, created.id).await, created);
    assert_eq!(offers(&svc, created.id).await, [cheap, other]);
}

#[tokio::test]
async fn accepts_offer_at_exact_ratio() {
    let svc = service();
    let created = svc
        .execute(new_property("Villa", "100000"))
        .await
        .unwrap();
    let exact = make_offer(&svc, created.id, "90000").await;

    _ = svc
        .execute(AcceptOffer { offer_id: exact.id })
        .await
        .unwrap();

    let accepted = property(&svc, created.id).await;
    assert_eq!(accepted.state, State::OfferAccepted);
    assert_eq!(accepted.selling_price, price("90000"));
}

#[tokio::test]
async fn checks_ratio_of_huge_expected_price() {
    let svc = service();
    let created = svc
        .execute(new_property("Castle", "10000000000000000000000000000"))
        .await
        .unwrap();
    let low = make_offer(&svc, created.id, "1").await;
    let high =
        make_offer(&svc, created.id, "9000000000000000000000000000").await;

    let err = svc
        .execute(AcceptOffer { offer_id: low.id })
        .await
        .unwrap_err();
    assert!(
        matches!(err.as_ref(), command::accept_offer::ExecutionError::Price(_)),
        "unexpected error: {err:?}",
    );
    assert_eq!(property(&svc, created.id).await, created);

    _ = svc
        .execute(AcceptOffer { offer_id: high.id })
        .await
        .unwrap();
    let accepted = property(&svc, created.id).await;
    assert_eq!(accepted.state, State::OfferAccepted);
    assert_eq!(accepted.selling_price, high.price);
}

#[tokio::test]
async fn sells_and_cancels_with_guards() {
    let svc = service();
    let canceled = svc
        .execute(new_property("Canceled", "100000"))
        .await
        .unwrap();
    let sold = svc
        .execute(new_property("Sold", "100000"))
        .await
        .unwrap();

    _ = svc
        .execute(CancelProperty {
            property_id: canceled.id,
        })
        .await
        .unwrap();
    let err = svc
        .execute(SellProperty {
            property_id: canceled.id,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_ref(),
        command::sell_property::ExecutionError::Transition(
            TransitionError::SellCanceled
        ),
    ));
    assert_eq!(property(&svc, canceled.id).await.state, State::Canceled);

    _ = svc
        .execute(SellProperty {
            property_id: sold.id,
        })
        .await
        .unwrap();
    let err = svc
        .execute(CancelProperty {
            property_id: sold.id,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_ref(),
        command::cancel_property::ExecutionError::Transition(
            TransitionError::CancelSold
        ),
    ));
    assert_eq!(property(&svc, sold.id).await.state, State::Sold);
}

#[tokio::test]
async fn refuses_accepting_on_finalized_property() {
    let svc = service();
    let created = svc
        .execute(new_property("Villa", "100000"))
        .await
        .unwrap();
    let bid = make_offer(&svc, created.id, "99000").await;
    _ = svc
        .execute(CancelProperty {
            property_id: created.id,
        })
        .await
        .unwrap();

    let err = svc
        .execute(AcceptOffer { offer_id: bid.id })
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_ref(),
        command::accept_offer::ExecutionError::Transition(
            TransitionError::Finalized { .. }
        ),
    ));
    assert_eq!(offers(&svc, created.id).await, [bid]);
}

#[tokio::test]
async fn computes_best_price() {
    let svc = service();
    let created = svc
        .execute(new_property("Villa", "100000"))
        .await
        .unwrap();

    let best = svc
        .execute(query::property::BestPrice::by(created.id))
        .await
        .unwrap();
    assert_eq!(best, Price::ZERO);

    for p in ["91000", "97500", "93000"] {
        _ = make_offer(&svc, created.id, p).await;
    }
    let best = svc
        .execute(query::property::BestPrice::by(created.id))
        .await
        .unwrap();
    assert_eq!(best, price("97500"));
}

#[tokio::test]
async fn updates_fields_and_total_area() {
    let svc = service();
    let created = svc
        .execute(new_property("Villa", "100000"))
        .await
        .unwrap();

    let updated = svc
        .execute(UpdateProperty {
            property_id: created.id,
            changes: Changes {
                living_area: Some(200),
                ..Changes::default().toggle_garden(false)
            },
            tag_ids: None,
        })
        .await
        .unwrap();

    assert_eq!(updated.total_area(), 200);
    assert!(!updated.garden);
    assert_eq!(updated.garden_orientation, None);
    assert_eq!(property(&svc, created.id).await, updated);
}

#[tokio::test]
async fn revalidates_price_on_update() {
    let svc = service();
    let created = svc
        .execute(new_property("Villa", "100000"))
        .await
        .unwrap();
    let bid = make_offer(&svc, created.id, "95000").await;
    _ = svc
        .execute(AcceptOffer { offer_id: bid.id })
        .await
        .unwrap();
    let accepted = property(&svc, created.id).await;

    let err = svc
        .execute(UpdateProperty {
            property_id: created.id,
            changes: Changes {
                expected_price: Some(price("200000")),
                ..Changes::default()
            },
            tag_ids: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_ref(),
        command::update_property::ExecutionError::Price(_),
    ));
    assert_eq!(property(&svc, created.id).await, accepted);

    let updated = svc
        .execute(UpdateProperty {
            property_id: created.id,
            changes: Changes {
                expected_price: Some(price("105000")),
                ..Changes::default()
            },
            tag_ids: None,
        })
        .await
        .unwrap();
    assert_eq!(updated.expected_price, price("105000"));
}

#[tokio::test]
async fn syncs_offers_with_property_type() {
    let svc = service();
    let house = svc
        .execute(CreatePropertyType {
            name: "House".parse().unwrap(),
            sequence: None,
        })
        .await
        .unwrap();
    let created = svc
        .execute(new_property("Villa", "100000"))
        .await
        .unwrap();
    let first = make_offer(&svc, created.id, "95000").await;
    let second = make_offer(&svc, created.id, "96000").await;
    assert_eq!(first.property_type_id, None);

    _ = svc
        .execute(UpdateProperty {
            property_id: created.id,
            changes: Changes {
                property_type_id: Some(Some(house.id)),
                ..Changes::default()
            },
            tag_ids: None,
        })
        .await
        .unwrap();

    for o in offers(&svc, created.id).await {
        assert!([first.id, second.id].contains(&o.id));
        assert_eq!(o.property_type_id, Some(house.id));
    }
    let third = make_offer(&svc, created.id, "97000").await;
    assert_eq!(third.property_type_id, Some(house.id));
}

#[tokio::test]
async fn duplicates_without_sale_details() {
    let svc = service();
    let tag = svc
        .execute(CreatePropertyTag {
            name: "Cozy".parse().unwrap(),
            color: Some(3),
        })
        .await
        .unwrap();
    let created = svc
        .execute(CreateProperty {
            date_availability: Some(
                property::AvailabilityDate::from_calendar_date(2020, 1, 1)
                    .unwrap(),
            ),
            tag_ids: vec![tag.id],
            ..new_property("Villa", "100000")
        })
        .await
        .unwrap();
    let bid = make_offer(&svc, created.id, "95000").await;
    _ = svc
        .execute(AcceptOffer { offer_id: bid.id })
        .await
        .unwrap();

    let copy = svc
        .execute(DuplicateProperty {
            property_id: created.id,
        })
        .await
        .unwrap();

    assert_ne!(copy.id, created.id);
    assert_eq!(copy.name, created.name);
    assert_eq!(copy.expected_price, created.expected_price);
    assert_eq!(copy.selling_price, Price::ZERO);
    assert_eq!(copy.buyer_id, None);
    assert_eq!(copy.state, State::New);
    assert_eq!(
        copy.date_availability,
        property::AvailabilityDate::today().add_months(3),
    );
    assert!(offers(&svc, copy.id).await.is_empty());

    let tags = svc
        .execute(query::property::Tags::by(copy.id))
        .await
        .unwrap();
    assert_eq!(tags.tag_ids.into_iter().collect::<Vec<_>>(), [tag.id]);
}

#[tokio::test]
async fn lists_active_properties_by_name() {
    let svc = service();
    for name in ["Attic", "Cottage", "Bungalow"] {
        _ = svc.execute(new_property(name, "100000")).await.unwrap();
    }
    let archived = svc
        .execute(new_property("Duplex", "100000"))
        .await
        .unwrap();
    _ = svc
        .execute(UpdateProperty {
            property_id: archived.id,
            changes: Changes {
                active: Some(false),
                ..Changes::default()
            },
            tag_ids: None,
        })
        .await
        .unwrap();

    let names = |list: Vec<Property>| {
        list.into_iter()
            .map(|p| p.name.to_string())
            .collect::<Vec<_>>()
    };

    let active = svc
        .execute(query::properties::List::by(
            read::property::list::Filter::default(),
        ))
        .await
        .unwrap();
    assert_eq!(names(active), ["Cottage", "Bungalow", "Attic"]);

    let all = svc
        .execute(query::properties::List::by(read::property::list::Filter {
            active: None,
            ..read::property::list::Filter::default()
        }))
        .await
        .unwrap();
    assert_eq!(names(all), ["Duplex", "Cottage", "Bungalow", "Attic"]);
}
