//! [`PropertyType`] and [`PropertyTag`] scenarios.

use common::Price;
use service::{
    command::{
        self, CreateOffer, CreateProperty, CreatePropertyTag,
        CreatePropertyType, DeletePropertyTag, DeletePropertyType,
        UpdatePropertyTag, UpdatePropertyType,
    },
    domain::{property, property_type, Property, PropertyTag, PropertyType},
    infra::Memory,
    query, Command as _, Config, Query as _, Service,
};
use uuid::Uuid;

fn service() -> Service<Memory> {
    Service::new(Config::default(), Memory::new())
}

async fn new_type(svc: &Service<Memory>, name: &str) -> PropertyType {
    svc.execute(CreatePropertyType {
        name: name.parse().unwrap(),
        sequence: None,
    })
    .await
    .unwrap()
}

async fn new_tag(svc: &Service<Memory>, name: &str) -> PropertyTag {
    svc.execute(CreatePropertyTag {
        name: name.parse().unwrap(),
        color: None,
    })
    .await
    .unwrap()
}

async fn new_property(
    svc: &Service<Memory>,
    property_type_id: Option<property_type::Id>,
    tag_ids: Vec<service::domain::property_tag::Id>,
) -> Property {
    svc.execute(CreateProperty {
        initiator_id: Uuid::new_v4().into(),
        name: None,
        description: "Family home".parse().unwrap(),
        postcode: "3000".parse().unwrap(),
        date_availability: None,
        expected_price: "250000".parse().unwrap(),
        bedrooms: None,
        living_area: 100,
        facades: 2,
        garage: false,
        garden: false,
        garden_area: 0,
        garden_orientation: None,
        property_type_id,
        seller_id: None,
        tag_ids,
    })
    .await
    .unwrap()
}

async fn bid(svc: &Service<Memory>, property_id: property::Id) {
    _ = svc
        .execute(CreateOffer {
            property_id,
            partner_id: Uuid::new_v4().into(),
            price: Price::ZERO,
            validity: None,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn refuses_duplicate_type_names() {
    let svc = service();
    let house = new_type(&svc, "House").await;
    assert_eq!(house.sequence, property_type::DEFAULT_SEQUENCE);

    let err = svc
        .execute(CreatePropertyType {
            name: "House".parse().unwrap(),
            sequence: Some(5),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_ref(),
        command::create_property_type::ExecutionError::NameOccupied(_),
    ));

    let flat = new_type(&svc, "Flat").await;
    let err = svc
        .execute(UpdatePropertyType {
            property_type_id: flat.id,
            name: Some("House".parse().unwrap()),
            sequence: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_ref(),
        command::update_property_type::ExecutionError::NameOccupied(_),
    ));

    let renamed = svc
        .execute(UpdatePropertyType {
            property_type_id: house.id,
            name: Some("House".parse().unwrap()),
            sequence: Some(0),
        })
        .await
        .unwrap();
    assert_eq!(renamed.sequence, 0);
}

#[tokio::test]
async fn lists_types_by_sequence_and_name() {
    let svc = service();
    for (name, sequence) in [("Villa", 1), ("Flat", 2), ("Castle", 1)] {
        _ = svc
            .execute(CreatePropertyType {
                name: name.parse().unwrap(),
                sequence: Some(sequence),
            })
            .await
            .unwrap();
    }

    let names = svc
        .execute(query::property_types::List::by(()))
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name.to_string())
        .collect::<Vec<_>>();
    assert_eq!(names, ["Castle", "Villa", "Flat"]);
}

#[tokio::test]
async fn counts_offers_of_type() {
    let svc = service();
    let house = new_type(&svc, "House").await;
    let flat = new_type(&svc, "Flat").await;

    let first = new_property(&svc, Some(house.id), vec![]).await;
    let second = new_property(&svc, Some(house.id), vec![]).await;
    let other = new_property(&svc, Some(flat.id), vec![]).await;
    bid(&svc, first.id).await;
    bid(&svc, first.id).await;
    bid(&svc, second.id).await;
    bid(&svc, other.id).await;

    let count = svc
        .execute(query::property_type::OfferCount::by(house.id))
        .await
        .unwrap();
    assert_eq!(count, 3_u64);

    let unused = new_type(&svc, "Barn").await;
    let count = svc
        .execute(query::property_type::OfferCount::by(unused.id))
        .await
        .unwrap();
    assert_eq!(count, 0_u64);
}

#[tokio::test]
async fn untypes_properties_of_deleted_type() {
    let svc = service();
    let house = new_type(&svc, "House").await;
    let typed = new_property(&svc, Some(house.id), vec![]).await;
    bid(&svc, typed.id).await;

    svc.execute(DeletePropertyType {
        property_type_id: house.id,
    })
    .await
    .unwrap();

    let found = svc
        .execute(query::property_type::ById::by(house.id))
        .await
        .unwrap();
    assert_eq!(found, None);
    let property = svc
        .execute(query::property::ById::by(typed.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(property.property_type_id, None);
    let offers = svc
        .execute(query::property::Offers::by(typed.id))
        .await
        .unwrap();
    assert!(offers.iter().all(|o| o.property_type_id.is_none()));

    let err = svc
        .execute(DeletePropertyType {
            property_type_id: house.id,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_ref(),
        command::delete_property_type::ExecutionError::NotExists(_),
    ));
}

#[tokio::test]
async fn refuses_duplicate_tag_names() {
    let svc = service();
    let cozy = new_tag(&svc, "Cozy").await;
    assert_eq!(cozy.color, 0);

    let err = svc
        .execute(CreatePropertyTag {
            name: "Cozy".parse().unwrap(),
            color: Some(2),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_ref(),
        command::create_property_tag::ExecutionError::NameOccupied(_),
    ));

    let renovated = new_tag(&svc, "Renovated").await;
    let err = svc
        .execute(UpdatePropertyTag {
            property_tag_id: renovated.id,
            name: Some("Cozy".parse().unwrap()),
            color: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_ref(),
        command::update_property_tag::ExecutionError::NameOccupied(_),
    ));

    let found = svc
        .execute(query::property_tag::ByName::by("Cozy".parse().unwrap()))
        .await
        .unwrap();
    assert_eq!(found, Some(cozy));
}

#[tokio::test]
async fn untags_properties_of_deleted_tag() {
    let svc = service();
    let cozy = new_tag(&svc, "Cozy").await;
    let sunny = new_tag(&svc, "Sunny").await;
    let tagged = new_property(&svc, None, vec![cozy.id, sunny.id]).await;

    svc.execute(DeletePropertyTag {
        property_tag_id: cozy.id,
    })
    .await
    .unwrap();

    let tags = svc
        .execute(query::property::Tags::by(tagged.id))
        .await
        .unwrap();
    assert_eq!(tags.tag_ids.into_iter().collect::<Vec<_>>(), [sunny.id]);

    let names = svc
        .execute(query::property_tags::List::by(()))
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name.to_string())
        .collect::<Vec<_>>();
    assert_eq!(names, ["Sunny"]);
}
