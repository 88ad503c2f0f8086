use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PageVisit::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PageVisit::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PageVisit::SessionId).string().not_null())
                    .col(ColumnDef::new(PageVisit::Page).string().not_null())
                    .col(ColumnDef::new(PageVisit::Referrer).text().null())
                    .col(ColumnDef::new(PageVisit::UserAgent).text().null())
                    .col(ColumnDef::new(PageVisit::DeviceType).string().null())
                    .col(ColumnDef::new(PageVisit::Browser).string().null())
                    .col(ColumnDef::new(PageVisit::Os).string().null())
                    .col(ColumnDef::new(PageVisit::ScreenSize).string().null())
                    .col(ColumnDef::new(PageVisit::Country).string().null())
                    .col(ColumnDef::new(PageVisit::City).string().null())
                    .col(
                        ColumnDef::new(PageVisit::VisitedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_page_visits_session")
                    .table(PageVisit::Table)
                    .col(PageVisit::SessionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Event::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Event::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Event::EventType).string().not_null())
                    .col(ColumnDef::new(Event::Page).string().not_null())
                    .col(ColumnDef::new(Event::SessionId).string().not_null())
                    .col(ColumnDef::new(Event::Referrer).text().null())
                    .col(ColumnDef::new(Event::DeviceType).string().null())
                    .col(ColumnDef::new(Event::Browser).string().null())
                    .col(
                        ColumnDef::new(Event::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Event::Table).to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_page_visits_session").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(PageVisit::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PageVisit {
    #[sea_orm(iden = "page_visits")]
    Table,
    Id,
    SessionId,
    Page,
    Referrer,
    UserAgent,
    DeviceType,
    Browser,
    Os,
    ScreenSize,
    Country,
    City,
    VisitedAt,
}

#[derive(DeriveIden)]
enum Event {
    #[sea_orm(iden = "events")]
    Table,
    Id,
    EventType,
    Page,
    SessionId,
    Referrer,
    DeviceType,
    Browser,
    CreatedAt,
}
