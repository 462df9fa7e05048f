use crate::report::{Column, Report};
use crate::row;
use crate::schema::{
    ColumnDefinition, DataType, ForeignKey, IndexDefinition, Schema, TableDefinition,
};
use crate::seed::TableSeed;

use super::{RunContext, Scenario};

/// Digital library catalogue: members, authors, genres, books and reviews.
pub struct LiteraryArchive;

impl Scenario for LiteraryArchive {
    fn name(&self) -> &'static str {
        "literary-archive"
    }

    fn summary(&self) -> &'static str {
        "Library catalogue with member reviews"
    }

    fn db_file(&self) -> &'static str {
        "literary_archive.db"
    }

    fn foreign_keys(&self) -> bool {
        true
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .add_table(
                TableDefinition::new("Members")
                    .column(ColumnDefinition::new("member_id", DataType::Integer).auto_increment())
                    .column(ColumnDefinition::new("display_name", DataType::Text).not_null())
                    .column(ColumnDefinition::new("login_email", DataType::Text).unique().not_null())
                    .column(ColumnDefinition::new("secure_hash", DataType::Text).not_null())
                    .column(ColumnDefinition::new("join_date", DataType::Text).not_null()),
            )
            .add_table(
                TableDefinition::new("Creators")
                    .column(ColumnDefinition::new("creator_id", DataType::Integer).auto_increment())
                    .column(ColumnDefinition::new("display_full_name", DataType::Text).not_null())
                    .column(ColumnDefinition::new("year_born", DataType::Integer)),
            )
            .add_table(
                TableDefinition::new("Categories")
                    .column(ColumnDefinition::new("category_id", DataType::Integer).auto_increment())
                    .column(ColumnDefinition::new("category_title", DataType::Text).unique().not_null()),
            )
            .add_table(
                TableDefinition::new("LibraryEntries")
                    .column(ColumnDefinition::new("entry_id", DataType::Integer).auto_increment())
                    .column(ColumnDefinition::new("entry_title", DataType::Text).not_null())
                    .column(ColumnDefinition::new("publication_year", DataType::Integer))
                    .column(ColumnDefinition::new("creator_ref_id", DataType::Integer).not_null())
                    .column(ColumnDefinition::new("category_ref_id", DataType::Integer).not_null())
                    .foreign_key(ForeignKey::new("creator_ref_id", "Creators", "creator_id"))
                    .foreign_key(ForeignKey::new("category_ref_id", "Categories", "category_id")),
            )
            .add_table(
                TableDefinition::new("UserFeedback")
                    .column(ColumnDefinition::new("feedback_id", DataType::Integer).auto_increment())
                    .column(ColumnDefinition::new("member_ref_id", DataType::Integer).not_null())
                    .column(ColumnDefinition::new("entry_ref_id", DataType::Integer).not_null())
                    .column(
                        ColumnDefinition::new("grade", DataType::Integer)
                            .check("grade >= 1 AND grade <= 5"),
                    )
                    .column(ColumnDefinition::new("feedback_text", DataType::Text))
                    .column(ColumnDefinition::new("feedback_date", DataType::Text).not_null())
                    .foreign_key(ForeignKey::new("member_ref_id", "Members", "member_id"))
                    .foreign_key(ForeignKey::new("entry_ref_id", "LibraryEntries", "entry_id")),
            )
            .add_index(IndexDefinition::new(
                "idx_feedback_entry",
                "UserFeedback",
                &["entry_ref_id"],
            ))
    }

    fn seeds(&self, _ctx: &RunContext) -> Vec<TableSeed> {
        vec![
            TableSeed::with_columns(
                "Members",
                &["display_name", "login_email", "secure_hash", "join_date"],
                vec![
                    row!["Anna Ivanova", "anna@archive.com", "hash_a123", "2025-01-15"],
                    row!["Igor Smirnov", "igor@archive.com", "hash_b456", "2025-03-22"],
                    row!["Elena Kuznetsova", "elena@archive.com", "hash_c789", "2025-07-10"],
                ],
            ),
            TableSeed::with_columns(
                "Creators",
                &["display_full_name", "year_born"],
                vec![
                    row!["Leo Tolstoy", 1828],
                    row!["Fyodor Dostoevsky", 1821],
                    row!["Alexander Pushkin", 1799],
                ],
            ),
            TableSeed::with_columns(
                "Categories",
                &["category_title"],
                vec![
                    row!["Classic Literature"],
                    row!["Science Fiction"],
                    row!["Mystery"],
                ],
            ),
            TableSeed::with_columns(
                "LibraryEntries",
                &["entry_title", "publication_year", "creator_ref_id", "category_ref_id"],
                vec![
                    row!["War and Peace", 1869, 1, 1],
                    row!["Crime and Punishment", 1866, 2, 1],
                    row!["Eugene Onegin", 1833, 3, 1],
                ],
            ),
            TableSeed::with_columns(
                "UserFeedback",
                &["member_ref_id", "entry_ref_id", "grade", "feedback_text", "feedback_date"],
                vec![
                    row![1, 1, 5, "Magnificent novel, read in one breath!", "2025-08-01"],
                    row![2, 2, 4, "Complex, but deep work.", "2025-08-15"],
                    row![3, 3, 5, "I love Pushkin! Reading again and again.", "2025-09-01"],
                ],
            ),
        ]
    }

    fn reports(&self, _ctx: &RunContext) -> Vec<Report> {
        vec![
            Report::table(
                "Review digest",
                "SELECT E.entry_title, C.display_full_name, G.category_title,
                        M.display_name, F.grade, F.feedback_date
                 FROM UserFeedback F
                 JOIN Members M ON F.member_ref_id = M.member_id
                 JOIN LibraryEntries E ON F.entry_ref_id = E.entry_id
                 JOIN Creators C ON E.creator_ref_id = C.creator_id
                 JOIN Categories G ON E.category_ref_id = G.category_id
                 ORDER BY F.feedback_date",
                vec![
                    Column::new("Book"),
                    Column::new("Author"),
                    Column::new("Genre"),
                    Column::new("Reviewer"),
                    Column::new("Grade"),
                    Column::new("Date"),
                ],
            ),
            Report::table(
                "Average grade per genre",
                "SELECT G.category_title,
                        COUNT(F.feedback_id) AS reviews,
                        AVG(F.grade) AS avg_grade
                 FROM Categories G
                 LEFT JOIN LibraryEntries E ON E.category_ref_id = G.category_id
                 LEFT JOIN UserFeedback F ON F.entry_ref_id = E.entry_id
                 GROUP BY G.category_id
                 ORDER BY G.category_title",
                vec![
                    Column::new("Genre"),
                    Column::new("Reviews"),
                    Column::new("Average").precision(2),
                ],
            ),
        ]
    }
}
