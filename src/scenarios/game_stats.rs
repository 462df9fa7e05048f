use crate::report::{Column, Layout, Report};
use crate::row;
use crate::schema::{ColumnDefinition, DataType, ForeignKey, Schema, TableDefinition};
use crate::seed::TableSeed;
use crate::sqlite::{Params, SqlQuery};

use super::{RunContext, Scenario};

/// Player whose average score is reported.
pub const SCORE_USER_ID: i64 = 1;
/// Session whose full log is reported.
pub const DETAIL_SESSION_ID: i64 = 2;

/// Game platform statistics: players, titles, sessions and per-player results.
pub struct GameStats;

impl Scenario for GameStats {
    fn name(&self) -> &'static str {
        "game-stats"
    }

    fn summary(&self) -> &'static str {
        "Game platform statistics"
    }

    fn db_file(&self) -> &'static str {
        "game_stats.db"
    }

    fn foreign_keys(&self) -> bool {
        true
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .add_table(
                TableDefinition::new("Users")
                    .column(ColumnDefinition::new("UserID", DataType::Integer).auto_increment())
                    .column(ColumnDefinition::new("Username", DataType::Text).not_null())
                    .column(ColumnDefinition::new("JoinedDate", DataType::Text).not_null()),
            )
            .add_table(
                TableDefinition::new("Titles")
                    .column(ColumnDefinition::new("TitleID", DataType::Integer).auto_increment())
                    .column(ColumnDefinition::new("GameName", DataType::Text).not_null()),
            )
            .add_table(
                TableDefinition::new("GameSessions")
                    .column(ColumnDefinition::new("SessionID", DataType::Integer).auto_increment())
                    .column(ColumnDefinition::new("TitleRefID", DataType::Integer).not_null())
                    .column(ColumnDefinition::new("SessionTime", DataType::Text).not_null())
                    .foreign_key(ForeignKey::new("TitleRefID", "Titles", "TitleID")),
            )
            .add_table(
                TableDefinition::new("PerformanceLog")
                    .column(ColumnDefinition::new("LogID", DataType::Integer).auto_increment())
                    .column(ColumnDefinition::new("SessionRefID", DataType::Integer).not_null())
                    .column(ColumnDefinition::new("UserRefID", DataType::Integer).not_null())
                    .column(ColumnDefinition::new("FinalScore", DataType::Integer).not_null())
                    .column(ColumnDefinition::new("Frags", DataType::Integer).not_null())
                    .column(ColumnDefinition::new("Deaths", DataType::Integer).not_null())
                    .column(ColumnDefinition::new("IsVictory", DataType::Boolean).not_null())
                    .foreign_key(ForeignKey::new("SessionRefID", "GameSessions", "SessionID"))
                    .foreign_key(ForeignKey::new("UserRefID", "Users", "UserID")),
            )
    }

    fn seeds(&self, _ctx: &RunContext) -> Vec<TableSeed> {
        vec![
            TableSeed::with_columns(
                "Users",
                &["Username", "JoinedDate"],
                vec![
                    row!["Phoenix", "2024-01-10"],
                    row!["Rider", "2023-11-15"],
                    row!["Warden", "2024-05-20"],
                    row!["Valkyrie", "2024-03-05"],
                    row!["Ghost", "2023-09-30"],
                ],
            ),
            TableSeed::with_columns(
                "Titles",
                &["GameName"],
                vec![row!["Cyber Arena"], row!["Space Battle"], row!["Mystic Quest"]],
            ),
            TableSeed::with_columns(
                "GameSessions",
                &["TitleRefID", "SessionTime"],
                vec![
                    row![1, "2024-04-01"],
                    row![1, "2024-04-05"],
                    row![2, "2024-03-15"],
                    row![2, "2024-03-20"],
                    row![3, "2024-02-10"],
                    row![3, "2024-02-15"],
                    row![1, "2024-04-10"],
                    row![2, "2024-03-25"],
                    row![3, "2024-02-20"],
                ],
            ),
            TableSeed::with_columns(
                "PerformanceLog",
                &["SessionRefID", "UserRefID", "FinalScore", "Frags", "Deaths", "IsVictory"],
                vec![
                    // session 1, Cyber Arena
                    row![1, 1, 1500, 10, 5, true],
                    row![1, 2, 1200, 8, 7, false],
                    row![1, 3, 1300, 9, 6, false],
                    // session 2, Cyber Arena
                    row![2, 2, 1400, 12, 4, true],
                    row![2, 4, 1100, 7, 8, false],
                    row![2, 5, 900, 5, 9, false],
                    // session 3, Space Battle
                    row![3, 1, 1600, 15, 3, true],
                    row![3, 3, 1000, 6, 10, false],
                    // session 4, Space Battle
                    row![4, 2, 1300, 11, 5, true],
                    row![4, 4, 1200, 10, 6, false],
                    // session 5, Mystic Quest
                    row![5, 3, 1100, 8, 7, true],
                    row![5, 5, 1050, 7, 8, false],
                    // session 6, Mystic Quest
                    row![6, 1, 1400, 12, 4, true],
                    row![6, 4, 1000, 5, 9, false],
                    // session 7, Cyber Arena
                    row![7, 3, 1350, 11, 6, true],
                    row![7, 5, 900, 5, 12, false],
                    // session 8, Space Battle
                    row![8, 2, 1250, 10, 7, true],
                    row![8, 1, 1150, 9, 8, false],
                    // session 9, Mystic Quest
                    row![9, 4, 1300, 12, 3, true],
                    row![9, 5, 1100, 8, 7, false],
                ],
            ),
        ]
    }

    fn reports(&self, _ctx: &RunContext) -> Vec<Report> {
        let average_score = SqlQuery::new(
            "SELECT AVG(FinalScore) FROM PerformanceLog WHERE UserRefID = :user_id",
        )
        .with_params(Params::new().with_value("user_id", SCORE_USER_ID));

        let session_detail = SqlQuery::new(
            "SELECT GS.SessionID, T.GameName AS Title, U.Username AS Player,
                    PL.FinalScore, PL.Frags, PL.Deaths,
                    CASE
                        WHEN PL.Deaths = 0 THEN CAST(PL.Frags AS REAL)
                        ELSE CAST(PL.Frags AS REAL) / PL.Deaths
                    END AS K_D_Ratio,
                    CASE WHEN PL.IsVictory THEN 'Victory' ELSE 'Defeat' END AS Outcome
             FROM GameSessions GS
             JOIN Titles T ON GS.TitleRefID = T.TitleID
             JOIN PerformanceLog PL ON GS.SessionID = PL.SessionRefID
             JOIN Users U ON PL.UserRefID = U.UserID
             WHERE GS.SessionID = :session_id
             ORDER BY U.Username",
        )
        .with_params(Params::new().with_value("session_id", DETAIL_SESSION_ID));

        vec![
            Report::table(
                "1. Users who joined in 2024",
                "SELECT UserID, Username, JoinedDate
                 FROM Users
                 WHERE JoinedDate LIKE '2024%'
                 ORDER BY UserID",
                vec![Column::new("ID"), Column::new("Username"), Column::new("Joined")],
            ),
            Report::new(
                format!("2. Average score of user {SCORE_USER_ID}"),
                average_score,
                Layout::Scalar,
            ),
            Report::table(
                "3. Top 5 titles by number of sessions",
                "SELECT T.GameName, COUNT(GS.SessionID) AS TotalSessions
                 FROM Titles T
                 JOIN GameSessions GS ON T.TitleID = GS.TitleRefID
                 GROUP BY T.TitleID
                 ORDER BY TotalSessions DESC, T.GameName
                 LIMIT 5",
                vec![Column::new("Title"), Column::new("Sessions")],
            ),
            Report::labeled(
                "4. User with the best average K/D ratio",
                "SELECT U.UserID, U.Username,
                        AVG(CAST(PL.Frags AS REAL) / NULLIF(PL.Deaths, 0)) AS Avg_KDRatio
                 FROM Users U
                 JOIN PerformanceLog PL ON U.UserID = PL.UserRefID
                 GROUP BY U.UserID
                 ORDER BY Avg_KDRatio DESC
                 LIMIT 1",
                vec![
                    Column::new("ID"),
                    Column::new("Username"),
                    Column::new("Avg K/D").precision(3),
                ],
            ),
            Report::table(
                "5. Users who played Cyber Arena but never won it",
                "SELECT DISTINCT U.UserID, U.Username
                 FROM Users U
                 JOIN PerformanceLog PL ON U.UserID = PL.UserRefID
                 JOIN GameSessions GS ON PL.SessionRefID = GS.SessionID
                 JOIN Titles T ON GS.TitleRefID = T.TitleID
                 WHERE T.GameName = 'Cyber Arena'
                   AND U.UserID NOT IN (
                       SELECT PL_INNER.UserRefID
                       FROM PerformanceLog PL_INNER
                       JOIN GameSessions GS_INNER ON PL_INNER.SessionRefID = GS_INNER.SessionID
                       JOIN Titles T_INNER ON GS_INNER.TitleRefID = T_INNER.TitleID
                       WHERE T_INNER.GameName = 'Cyber Arena' AND PL_INNER.IsVictory = 1
                   )
                 ORDER BY U.UserID",
                vec![Column::new("ID"), Column::new("Username")],
            )
            .when_empty("Everyone who played Cyber Arena has won it at least once."),
            Report::new(
                format!("6. Results of session {DETAIL_SESSION_ID}"),
                session_detail,
                Layout::Table(vec![
                    Column::new("Session"),
                    Column::new("Title"),
                    Column::new("Player"),
                    Column::new("Score"),
                    Column::new("Frags"),
                    Column::new("Deaths"),
                    Column::new("K/D").precision(2),
                    Column::new("Outcome"),
                ]),
            ),
        ]
    }
}
