//! [`PropertyType`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{property_type, PropertyType},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Restores a [`PropertyType`] from the provided [`Row`].
fn from_row(row: &Row) -> PropertyType {
    PropertyType {
        id: row.get("id"),
        name: row.get("name"),
        sequence: row.get("sequence"),
    }
}

impl<C> Database<Select<By<Option<PropertyType>, property_type::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<PropertyType>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<PropertyType>, property_type::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: property_type::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, sequence \
            FROM property_types \
            WHERE id = $1::UUID \
            LIMIT 1";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(from_row))
    }
}

impl<C> Database<Select<By<Option<PropertyType>, property_type::Name>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<PropertyType>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<PropertyType>, property_type::Name>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let name: property_type::Name = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, sequence \
            FROM property_types \
            WHERE name = $1::VARCHAR \
            LIMIT 1";
        self.query_opt(SQL, &[&name])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(from_row))
    }
}

impl<C> Database<Select<By<Vec<PropertyType>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<PropertyType>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<PropertyType>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name, sequence \
            FROM property_types \
            ORDER BY sequence, name, id";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C>
    Database<Select<By<read::property_type::OfferCount, property_type::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::property_type::OfferCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::property_type::OfferCount, property_type::Id>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: property_type::Id = by.into_inner();

        const SQL: &str = "\
            SELECT COUNT(*)::INT8 \
            FROM offers \
            JOIN properties ON properties.id = offers.property_id \
            WHERE properties.property_type_id = $1::UUID";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| {
                let count = row.expect("always exists").get::<_, i64>(0);
                u64::try_from(count).expect("`COUNT` is never negative").into()
            })
    }
}

impl<C> Database<Insert<PropertyType>> for Postgres<C>
where
    C: Connection,
    Self:
        Database<Update<PropertyType>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(ty): Insert<PropertyType>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(ty)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<PropertyType>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(ty): Update<PropertyType>,
    ) -> Result<Self::Ok, Self::Err> {
        let PropertyType { id, name, sequence } = ty;

        const SQL: &str = "\
            INSERT INTO property_types (id, name, sequence) \
            VALUES ($1::UUID, $2::VARCHAR, $3::INT4) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name, \
                sequence = EXCLUDED.sequence";
        self.exec(SQL, &[&id, &name, &sequence])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Delete<By<PropertyType, property_type::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<PropertyType, property_type::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: property_type::Id = by.into_inner();

        // References are unset by `ON DELETE SET NULL`.
        const SQL: &str = "\
            DELETE FROM property_types \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
