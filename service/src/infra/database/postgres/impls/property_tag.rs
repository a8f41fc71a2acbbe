//! [`PropertyTag`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{property_tag, PropertyTag},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Restores a [`PropertyTag`] from the provided [`Row`].
///
/// `color` is bounded by the `property_tags_color_range` constraint.
fn from_row(row: &Row) -> PropertyTag {
    PropertyTag {
        id: row.get("id"),
        name: row.get("name"),
        color: property_tag::Color::try_from(row.get::<_, i32>("color"))
            .expect("`color` overflow"),
    }
}

impl<C> Database<Select<By<Option<PropertyTag>, property_tag::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<PropertyTag>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<PropertyTag>, property_tag::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: property_tag::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, color \
            FROM property_tags \
            WHERE id = $1::UUID \
            LIMIT 1";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(from_row))
    }
}

impl<C> Database<Select<By<Option<PropertyTag>, property_tag::Name>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<PropertyTag>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<PropertyTag>, property_tag::Name>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let name: property_tag::Name = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, color \
            FROM property_tags \
            WHERE name = $1::VARCHAR \
            LIMIT 1";
        self.query_opt(SQL, &[&name])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(from_row))
    }
}

impl<C> Database<Select<By<Vec<PropertyTag>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<PropertyTag>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<PropertyTag>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name, color \
            FROM property_tags \
            ORDER BY name, id";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Insert<PropertyTag>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<PropertyTag>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(tag): Insert<PropertyTag>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(tag)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<PropertyTag>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(tag): Update<PropertyTag>,
    ) -> Result<Self::Ok, Self::Err> {
        let PropertyTag { id, name, color } = tag;
        let color = i32::from(color);

        const SQL: &str = "\
            INSERT INTO property_tags (id, name, color) \
            VALUES ($1::UUID, $2::VARCHAR, $3::INT4) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name, \
                color = EXCLUDED.color";
        self.exec(SQL, &[&id, &name, &color])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Delete<By<PropertyTag, property_tag::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<PropertyTag, property_tag::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: property_tag::Id = by.into_inner();

        // Taggings are removed by `ON DELETE CASCADE`.
        const SQL: &str = "\
            DELETE FROM property_tags \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
