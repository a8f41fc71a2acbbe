//! [`Property`]-related [`Database`] implementations.

use common::operations::{By, Insert, Lock, Select, Update};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{property, property_tag, Property},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Columns of the `properties` table, in the order [`from_row()`] expects.
const COLUMNS: &str = "\
    id, name, description, postcode, date_availability, \
    expected_price, selling_price, \
    bedrooms, living_area, facades, \
    garage, garden, garden_area, garden_orientation, \
    active, state, property_type_id, seller_id, buyer_id";

/// Restores a [`Property`] from the provided [`Row`] of [`COLUMNS`].
///
/// Numeric columns are bounded to their Rust ranges by the `*_range` table
/// constraints, so narrowing them never fails.
fn from_row(row: &Row) -> Property {
    Property {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        postcode: row.get("postcode"),
        date_availability: row.get("date_availability"),
        expected_price: row.get("expected_price"),
        selling_price: row.get("selling_price"),
        bedrooms: property::Bedrooms::try_from(row.get::<_, i32>("bedrooms"))
            .expect("`bedrooms` overflow"),
        living_area: property::Area::try_from(row.get::<_, i64>("living_area"))
            .expect("`living_area` overflow"),
        facades: property::Facades::try_from(row.get::<_, i32>("facades"))
            .expect("`facades` overflow"),
        garage: row.get("garage"),
        garden: row.get("garden"),
        garden_area: property::Area::try_from(row.get::<_, i64>("garden_area"))
            .expect("`garden_area` overflow"),
        garden_orientation: row.get("garden_orientation"),
        active: row.get("active"),
        state: row.get("state"),
        property_type_id: row.get("property_type_id"),
        seller_id: row.get("seller_id"),
        buyer_id: row.get("buyer_id"),
    }
}

impl<C> Database<Select<By<Option<Property>, property::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Property>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: property::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM properties \
             WHERE id = $1::UUID \
             LIMIT 1"
        );
        self.query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(from_row))
    }
}

impl<C> Database<Select<By<Vec<Property>, read::property::list::Filter>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Property>, read::property::list::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::property::list::Filter {
            active,
            state,
            property_type_id,
        } = by.into_inner();

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![];

        let active_idx = active.as_ref().map(|a| {
            ps.push(a);
            ps.len()
        });
        let state_idx = state.as_ref().map(|s| {
            ps.push(s);
            ps.len()
        });
        let type_idx = property_type_id.as_ref().map(|t| {
            ps.push(t);
            ps.len()
        });

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM properties \
             WHERE true \
                   {active_filtering} \
                   {state_filtering} \
                   {type_filtering} \
             ORDER BY name DESC, id",
            active_filtering = active_idx.into_iter().format_with("", |i, f| {
                f(&format_args!("AND active = ${i}::BOOL"))
            }),
            state_filtering = state_idx.into_iter().format_with("", |i, f| {
                f(&format_args!("AND state = ${i}::INT2"))
            }),
            type_filtering = type_idx.into_iter().format_with("", |i, f| {
                f(&format_args!("AND property_type_id = ${i}::UUID"))
            }),
        );
        Ok(self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Insert<Property>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Property>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(property): Insert<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(property))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Property>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(property): Update<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        let Property {
            id,
            name,
            description,
            postcode,
            date_availability,
            expected_price,
            selling_price,
            bedrooms,
            living_area,
            facades,
            garage,
            garden,
            garden_area,
            garden_orientation,
            active,
            state,
            property_type_id,
            seller_id,
            buyer_id,
        } = property;

        let bedrooms = i32::from(bedrooms);
        let living_area = i64::from(living_area);
        let facades = i32::from(facades);
        let garden_area = i64::from(garden_area);

        let sql = format!(
            "INSERT INTO properties ({COLUMNS}) \
             VALUES (\
                 $1::UUID, $2::VARCHAR, $3::TEXT, $4::VARCHAR, $5::DATE, \
                 $6::NUMERIC, $7::NUMERIC, \
                 $8::INT4, $9::INT8, $10::INT4, \
                 $11::BOOL, $12::BOOL, $13::INT8, $14::INT2, \
                 $15::BOOL, $16::INT2, $17::UUID, $18::UUID, $19::UUID \
             ) \
             ON CONFLICT (id) DO UPDATE \
             SET name = EXCLUDED.name, \
                 description = EXCLUDED.description, \
                 postcode = EXCLUDED.postcode, \
                 date_availability = EXCLUDED.date_availability, \
                 expected_price = EXCLUDED.expected_price, \
                 selling_price = EXCLUDED.selling_price, \
                 bedrooms = EXCLUDED.bedrooms, \
                 living_area = EXCLUDED.living_area, \
                 facades = EXCLUDED.facades, \
                 garage = EXCLUDED.garage, \
                 garden = EXCLUDED.garden, \
                 garden_area = EXCLUDED.garden_area, \
                 garden_orientation = EXCLUDED.garden_orientation, \
                 active = EXCLUDED.active, \
                 state = EXCLUDED.state, \
                 property_type_id = EXCLUDED.property_type_id, \
                 seller_id = EXCLUDED.seller_id, \
                 buyer_id = EXCLUDED.buyer_id"
        );
        self.exec(
            &sql,
            &[
                &id,
                &name,
                &description,
                &postcode,
                &date_availability,
                &expected_price,
                &selling_price,
                &bedrooms,
                &living_area,
                &facades,
                &garage,
                &garden,
                &garden_area,
                &garden_orientation,
                &active,
                &state,
                &property_type_id,
                &seller_id,
                &buyer_id,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Lock<By<Property, property::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Property, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: property::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM properties \
            WHERE id = $1::UUID \
            FOR UPDATE";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<read::property::BestPrice, property::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::property::BestPrice;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::property::BestPrice, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: property::Id = by.into_inner();

        const SQL: &str = "\
            SELECT COALESCE(MAX(price), 0)::NUMERIC AS best_price \
            FROM offers \
            WHERE property_id = $1::UUID";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| {
                read::property::BestPrice::from(
                    row.expect("always exists")
                        .get::<_, common::Price>("best_price"),
                )
            })
    }
}

impl<C> Database<Select<By<property::Tags, property::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = property::Tags;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<property::Tags, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: property::Id = by.into_inner();

        const SQL: &str = "\
            SELECT property_tag_id \
            FROM property_taggings \
            WHERE property_id = $1::UUID";
        let rows = self
            .query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?;

        Ok(property::Tags::new(
            id,
            rows.iter()
                .map(|row| row.get::<_, property_tag::Id>("property_tag_id")),
        ))
    }
}

impl<C> Database<Update<property::Tags>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(tags): Update<property::Tags>,
    ) -> Result<Self::Ok, Self::Err> {
        let property::Tags {
            property_id,
            tag_ids,
        } = tags;
        let tag_ids = tag_ids.into_iter().collect::<Vec<_>>();

        const SQL: &str = "\
            WITH removed AS (\
                DELETE FROM property_taggings \
                WHERE property_id = $1::UUID \
                  AND property_tag_id <> ALL($2::UUID[]) \
            ) \
            INSERT INTO property_taggings (property_id, property_tag_id) \
            SELECT $1::UUID, unnest($2::UUID[]) \
            ON CONFLICT DO NOTHING";
        self.exec(SQL, &[&property_id, &tag_ids])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
