//! [`Offer`] scenarios.

use common::Price;
use service::{
    command::{
        self, CreateOffer, CreateProperty, DuplicateOffer, RefuseOffer,
        UpdateOffer,
    },
    domain::{
        offer::{self, Validity},
        property, Offer,
    },
    infra::Memory,
    query, Command as _, Config, Query as _, Service,
};
use uuid::Uuid;

fn service() -> Service<Memory> {
    Service::new(Config::default(), Memory::new())
}

fn price(s: &str) -> Price {
    s.parse().unwrap()
}

async fn new_property(svc: &Service<Memory>) -> property::Id {
    svc.execute(CreateProperty {
        initiator_id: Uuid::new_v4().into(),
        name: None,
        description: "Flat with a view".parse().unwrap(),
        postcode: "75001".parse().unwrap(),
        date_availability: None,
        expected_price: price("300000"),
        bedrooms: Some(1),
        living_area: 45,
        facades: 2,
        garage: false,
        garden: false,
        garden_area: 0,
        garden_orientation: None,
        property_type_id: None,
        seller_id: None,
        tag_ids: vec![],
    })
    .await
    .unwrap()
    .id
}

async fn new_offer(svc: &Service<Memory>, property_id: property::Id) -> Offer {
    svc.execute(CreateOffer {
        property_id,
        partner_id: Uuid::new_v4().into(),
        price: price("280000"),
        validity: None,
    })
    .await
    .unwrap()
}

async fn stored(svc: &Service<Memory>, id: offer::Id) -> Offer {
    svc.execute(query::offer::ById::by(id))
        .await
        .unwrap()
        .unwrap()
}

#[tokio::test]
async fn creates_with_defaults() {
    let svc = service();
    let property_id = new_property(&svc).await;

    let created = new_offer(&svc, property_id).await;

    assert_eq!(created.status, None);
    assert_eq!(created.validity, Validity::DEFAULT);
    assert_eq!(created.created_on, offer::CreationDate::today());
    assert_eq!(created.deadline().days_since(created.created_on), 7);
    assert_eq!(stored(&svc, created.id).await, created);

    let property = svc
        .execute(query::property::ById::by(property_id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(property.state, property::State::New);
}

#[tokio::test]
async fn refuses_offer_on_unknown_property() {
    let svc = service();
    let unknown = property::Id::new();

    let err = svc
        .execute(CreateOffer {
            property_id: unknown,
            partner_id: Uuid::new_v4().into(),
            price: price("1"),
            validity: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_ref(),
        command::create_offer::ExecutionError::PropertyNotExists(id)
            if *id == unknown,
    ));
}

#[tokio::test]
async fn moves_creation_date_with_deadline() {
    let svc = service();
    let property_id = new_property(&svc).await;
    let created = new_offer(&svc, property_id).await;

    let deadline = created.deadline().add_days(3);
    let updated = svc
        .execute(UpdateOffer {
            offer_id: created.id,
            price: None,
            validity: None,
            deadline: Some(deadline),
        })
        .await
        .unwrap();

    assert_eq!(updated.deadline(), deadline);
    assert_eq!(updated.validity, Validity::DEFAULT);
    assert_eq!(updated.created_on, created.created_on.add_days(3));
    assert_eq!(
        Validity::between(updated.created_on, updated.deadline()),
        Some(Validity::DEFAULT),
    );
}

#[tokio::test]
async fn moves_deadline_with_validity() {
    let svc = service();
    let property_id = new_property(&svc).await;
    let created = new_offer(&svc, property_id).await;

    let updated = svc
        .execute(UpdateOffer {
            offer_id: created.id,
            price: Some(price("290000")),
            validity: Some(Validity::new(14)),
            deadline: None,
        })
        .await
        .unwrap();

    assert_eq!(updated.price, price("290000"));
    assert_eq!(updated.created_on, created.created_on);
    assert_eq!(updated.deadline(), created.deadline().add_days(7));
    assert_eq!(stored(&svc, created.id).await, updated);
}

#[tokio::test]
async fn refuses_without_cascade() {
    let svc = service();
    let property_id = new_property(&svc).await;
    let refused = new_offer(&svc, property_id).await;
    let other = new_offer(&svc, property_id).await;

    let result = svc
        .execute(RefuseOffer {
            offer_id: refused.id,
        })
        .await
        .unwrap();

    assert_eq!(result.status, Some(offer::Status::Refused));
    assert_eq!(stored(&svc, refused.id).await, result);
    assert_eq!(stored(&svc, other.id).await, other);
}

#[tokio::test]
async fn duplicates_without_status() {
    let svc = service();
    let property_id = new_property(&svc).await;
    let original = new_offer(&svc, property_id).await;
    _ = svc
        .execute(RefuseOffer {
            offer_id: original.id,
        })
        .await
        .unwrap();

    let copy = svc
        .execute(DuplicateOffer {
            offer_id: original.id,
        })
        .await
        .unwrap();

    assert_ne!(copy.id, original.id);
    assert_eq!(copy.status, None);
    assert_eq!(copy.price, original.price);
    assert_eq!(copy.partner_id, original.partner_id);
    assert_eq!(copy.property_id, property_id);
    assert_eq!(copy.deadline(), original.deadline());

    let offers = svc
        .execute(query::property::Offers::by(property_id))
        .await
        .unwrap();
    assert_eq!(offers.len(), 2);
}

#[tokio::test]
async fn refuses_unknown_offer() {
    let svc = service();
    let unknown = offer::Id::new();

    let err = svc
        .execute(UpdateOffer {
            offer_id: unknown,
            price: Some(price("1")),
            validity: None,
            deadline: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_ref(),
        command::update_offer::ExecutionError::OfferNotExists(_),
    ));
}
