//! [`Offer`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{offer, property, Offer},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Restores an [`Offer`] from the provided [`Row`].
fn from_row(row: &Row) -> Offer {
    Offer {
        id: row.get("id"),
        property_id: row.get("property_id"),
        property_type_id: row.get("property_type_id"),
        partner_id: row.get("partner_id"),
        price: row.get("price"),
        status: row.get("status"),
        validity: row.get("validity"),
        created_on: row.get("created_on"),
    }
}

impl<C> Database<Select<By<Option<Offer>, offer::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Offer>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Offer>, offer::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: offer::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, property_id, property_type_id, partner_id, \
                   price, status, validity, created_on \
            FROM offers \
            WHERE id = $1::UUID \
            LIMIT 1";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(from_row))
    }
}

impl<C> Database<Select<By<Vec<Offer>, property::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Offer>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Offer>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let property_id: property::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, property_id, property_type_id, partner_id, \
                   price, status, validity, created_on \
            FROM offers \
            WHERE property_id = $1::UUID \
            ORDER BY price DESC, id";
        Ok(self
            .query(SQL, &[&property_id])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Insert<Offer>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Offer>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(offer): Insert<Offer>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(offer)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Offer>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(offer): Update<Offer>,
    ) -> Result<Self::Ok, Self::Err> {
        let Offer {
            id,
            property_id,
            property_type_id,
            partner_id,
            price,
            status,
            validity,
            created_on,
        } = offer;

        // `property_id` never changes, so it's not updated on conflict.
        const SQL: &str = "\
            INSERT INTO offers (\
                id, property_id, property_type_id, partner_id, \
                price, status, validity, created_on \
            ) VALUES (\
                $1::UUID, $2::UUID, $3::UUID, $4::UUID, \
                $5::NUMERIC, $6::INT2, $7::INT4, $8::DATE \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET property_type_id = EXCLUDED.property_type_id, \
                partner_id = EXCLUDED.partner_id, \
                price = EXCLUDED.price, \
                status = EXCLUDED.status, \
                validity = EXCLUDED.validity, \
                created_on = EXCLUDED.created_on";
        self.exec(
            SQL,
            &[
                &id,
                &property_id,
                &property_type_id,
                &partner_id,
                &price,
                &status,
                &validity,
                &created_on,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
