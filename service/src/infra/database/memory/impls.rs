//! [`Database`] implementations of [`Memory`].

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{
        offer, property, property_tag, property_type, Offer, Property,
        PropertyTag, PropertyType,
    },
    infra::{database, Database},
    read,
};

use super::{Memory, Storage};

impl<S: Storage> Database<Select<By<Option<Property>, property::Id>>>
    for Memory<S>
{
    type Ok = Option<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Property>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.read(|s| s.property(id).cloned())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<S: Storage>
    Database<Select<By<Vec<Property>, read::property::list::Filter>>>
    for Memory<S>
{
    type Ok = Vec<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Property>, read::property::list::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();
        self.read(|s| s.properties(&filter))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<S: Storage> Database<Insert<Property>> for Memory<S> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(property): Insert<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(property)).await.map_err(tracerr::wrap!())
    }
}

impl<S: Storage> Database<Update<Property>> for Memory<S> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(property): Update<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|s| s.put_property(property))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<S: Storage> Database<Lock<By<Property, property::Id>>> for Memory<S> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Lock<By<Property, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Transactions are serialized already.
        Ok(())
    }
}

impl<S: Storage> Database<Select<By<read::property::BestPrice, property::Id>>>
    for Memory<S>
{
    type Ok = read::property::BestPrice;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::property::BestPrice, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.read(|s| read::property::BestPrice::of(&s.offers_of(id)))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<S: Storage> Database<Select<By<Vec<Offer>, property::Id>>> for Memory<S> {
    type Ok = Vec<Offer>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Offer>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.read(|s| s.offers_of(id))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<S: Storage> Database<Select<By<property::Tags, property::Id>>>
    for Memory<S>
{
    type Ok = property::Tags;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<property::Tags, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.read(|s| s.tags_of(id))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<S: Storage> Database<Update<property::Tags>> for Memory<S> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(tags): Update<property::Tags>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|s| s.put_tags(tags))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<S: Storage> Database<Select<By<Option<Offer>, offer::Id>>> for Memory<S> {
    type Ok = Option<Offer>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Offer>, offer::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.read(|s| s.offer(id).cloned())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<S: Storage> Database<Insert<Offer>> for Memory<S> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(offer): Insert<Offer>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(offer)).await.map_err(tracerr::wrap!())
    }
}

impl<S: Storage> Database<Update<Offer>> for Memory<S> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(offer): Update<Offer>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|s| s.put_offer(offer))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<S: Storage> Database<Select<By<Option<PropertyType>, property_type::Id>>>
    for Memory<S>
{
    type Ok = Option<PropertyType>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<PropertyType>, property_type::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.read(|s| s.property_type(id).cloned())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<S: Storage>
    Database<Select<By<Option<PropertyType>, property_type::Name>>>
    for Memory<S>
{
    type Ok = Option<PropertyType>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<PropertyType>, property_type::Name>>,
    ) -> Result<Self::Ok, Self::Err> {
        let name = by.into_inner();
        self.read(|s| s.property_type_by_name(&name).cloned())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<S: Storage> Database<Select<By<Vec<PropertyType>, ()>>> for Memory<S> {
    type Ok = Vec<PropertyType>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<PropertyType>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.read(super::State::property_types)
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<S: Storage>
    Database<Select<By<read::property_type::OfferCount, property_type::Id>>>
    for Memory<S>
{
    type Ok = read::property_type::OfferCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::property_type::OfferCount, property_type::Id>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.read(|s| s.offer_count(id))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<S: Storage> Database<Insert<PropertyType>> for Memory<S> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(ty): Insert<PropertyType>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(ty)).await.map_err(tracerr::wrap!())
    }
}

impl<S: Storage> Database<Update<PropertyType>> for Memory<S> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(ty): Update<PropertyType>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|s| s.put_property_type(ty))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<S: Storage> Database<Delete<By<PropertyType, property_type::Id>>>
    for Memory<S>
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<PropertyType, property_type::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.write(|s| {
            s.remove_property_type(id);
            Ok(())
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<S: Storage> Database<Select<By<Option<PropertyTag>, property_tag::Id>>>
    for Memory<S>
{
    type Ok = Option<PropertyTag>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<PropertyTag>, property_tag::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.read(|s| s.property_tag(id).cloned())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<S: Storage>
    Database<Select<By<Option<PropertyTag>, property_tag::Name>>>
    for Memory<S>
{
    type Ok = Option<PropertyTag>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<PropertyTag>, property_tag::Name>>,
    ) -> Result<Self::Ok, Self::Err> {
        let name = by.into_inner();
        self.read(|s| s.property_tag_by_name(&name).cloned())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<S: Storage> Database<Select<By<Vec<PropertyTag>, ()>>> for Memory<S> {
    type Ok = Vec<PropertyTag>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<PropertyTag>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.read(super::State::property_tags)
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<S: Storage> Database<Insert<PropertyTag>> for Memory<S> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(tag): Insert<PropertyTag>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(tag)).await.map_err(tracerr::wrap!())
    }
}

impl<S: Storage> Database<Update<PropertyTag>> for Memory<S> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(tag): Update<PropertyTag>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|s| s.put_property_tag(tag))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<S: Storage> Database<Delete<By<PropertyTag, property_tag::Id>>>
    for Memory<S>
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<PropertyTag, property_tag::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.write(|s| {
            s.remove_property_tag(id);
            Ok(())
        })
        .await
        .map_err(tracerr::wrap!())
    }
}
