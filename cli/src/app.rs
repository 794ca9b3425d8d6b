//! Command dispatch
//!
//! Turns a parsed [`Command`] into use case calls and renders the result
//! with the selected formatter. Printing is left to `main`.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use pollster_application::{
    AdminError, AdminQuery, AuditLogger, CastVoteUseCase, ListingParams, ManagePollsUseCase,
    NewQuestion, QueryError, QueryPollsUseCase, QuestionChanges, VoteError, VoteRequest,
};
use pollster_domain::{PollRepository, QuestionId};
use pollster_presentation::{AdminCommand, Command, PollFormatter};
use std::process::ExitCode;
use std::sync::Arc;

/// How a command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    /// The input was rejected; the body explains why.
    Rejected,
    /// The addressed question or choice does not exist (or is not visible).
    NotFound,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => ExitCode::SUCCESS,
            Status::Rejected => ExitCode::from(1),
            Status::NotFound => ExitCode::from(2),
        }
    }
}

/// Rendered output of a command.
#[derive(Debug)]
pub struct Response {
    pub body: String,
    pub status: Status,
}

impl Response {
    fn success(body: String) -> Self {
        Self {
            body,
            status: Status::Success,
        }
    }

    fn rejected(body: String) -> Self {
        Self {
            body,
            status: Status::Rejected,
        }
    }

    fn not_found(body: String) -> Self {
        Self {
            body,
            status: Status::NotFound,
        }
    }
}

/// Use cases wired to one repository, plus the output formatter.
pub struct App {
    queries: QueryPollsUseCase,
    votes: CastVoteUseCase,
    admin: ManagePollsUseCase,
    formatter: Box<dyn PollFormatter>,
}

impl App {
    pub fn new(
        repository: Arc<dyn PollRepository>,
        params: ListingParams,
        audit_logger: Arc<dyn AuditLogger>,
        formatter: Box<dyn PollFormatter>,
    ) -> Self {
        Self {
            queries: QueryPollsUseCase::new(repository.clone()).with_params(params),
            votes: CastVoteUseCase::new(repository.clone())
                .with_audit_logger(audit_logger.clone()),
            admin: ManagePollsUseCase::new(repository).with_audit_logger(audit_logger),
            formatter,
        }
    }

    pub async fn handle(&self, command: Command, now: DateTime<Utc>) -> Result<Response> {
        match command {
            Command::Index => {
                let questions = self.queries.latest_questions(now).await?;
                Ok(Response::success(self.formatter.format_index(&questions)))
            }
            Command::Detail { question_id } => {
                match self.queries.question_detail(question_id, now).await {
                    Ok(detail) => Ok(Response::success(
                        self.formatter.format_detail(&detail, None),
                    )),
                    Err(QueryError::NotFound(id)) => Ok(self.question_not_found(id)),
                    Err(e) => Err(e.into()),
                }
            }
            Command::Results { question_id } => {
                match self.queries.results(question_id, now).await {
                    Ok(results) => Ok(Response::success(self.formatter.format_results(&results))),
                    Err(QueryError::NotFound(id)) => Ok(self.question_not_found(id)),
                    Err(e) => Err(e.into()),
                }
            }
            Command::Vote {
                question_id,
                choice,
            } => self.vote(question_id, choice, now).await,
            Command::Admin { command } => self.admin(command, now).await,
        }
    }

    async fn vote(
        &self,
        question_id: QuestionId,
        choice: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Response> {
        let mut request = VoteRequest::new(question_id);
        if let Some(choice) = choice {
            request = request.with_choice(choice);
        }

        match self.votes.execute(request, now).await {
            Ok(outcome) => {
                let results = self.queries.results(question_id, now).await?;
                Ok(Response::success(
                    self.formatter.format_vote(&outcome, &results),
                ))
            }
            Err(VoteError::QuestionNotFound(id)) => Ok(self.question_not_found(id)),
            Err(e) => {
                let Some(message) = e.user_message() else {
                    return Err(e.into());
                };
                let detail = self.queries.question_detail(question_id, now).await?;
                Ok(Response::rejected(
                    self.formatter.format_detail(&detail, Some(message)),
                ))
            }
        }
    }

    async fn admin(&self, command: AdminCommand, now: DateTime<Utc>) -> Result<Response> {
        let result = match command {
            AdminCommand::List { search, published } => {
                let query = AdminQuery {
                    search,
                    published: published.into(),
                };
                self.admin
                    .list_questions(&query, now)
                    .await
                    .map(|rows| self.formatter.format_admin_list(&rows, &query))
            }
            AdminCommand::AddQuestion {
                text,
                published_at,
                days,
                choice,
            } => {
                let published_at = published_at
                    .or_else(|| days.map(|d| now + Duration::days(d)))
                    .unwrap_or(now);
                let input = choice
                    .into_iter()
                    .fold(NewQuestion::new(text, published_at), |q, c| q.with_choice(c));
                self.admin
                    .create_question(input)
                    .await
                    .map(|detail| self.formatter.format_detail(&detail, None))
            }
            AdminCommand::EditQuestion {
                question_id,
                text,
                published_at,
            } => {
                let changes = QuestionChanges { text, published_at };
                if changes.is_empty() {
                    return Ok(Response::rejected(
                        self.formatter
                            .format_error("nothing to change, pass --text or --published-at"),
                    ));
                }
                match self.admin.update_question(question_id, changes).await {
                    Ok(_) => self
                        .admin
                        .question(question_id)
                        .await
                        .map(|detail| self.formatter.format_detail(&detail, None)),
                    Err(e) => Err(e),
                }
            }
            AdminCommand::DeleteQuestion { question_id } => self
                .admin
                .delete_question(question_id)
                .await
                .map(|()| {
                    self.formatter
                        .format_notice(&format!("Deleted question {}.", question_id))
                }),
            AdminCommand::AddChoice { question_id, text } => self
                .admin
                .add_choice(question_id, text)
                .await
                .map(|choice_id| {
                    self.formatter.format_notice(&format!(
                        "Added choice {} to question {}.",
                        choice_id, question_id
                    ))
                }),
            AdminCommand::DeleteChoice { choice_id } => self
                .admin
                .delete_choice(choice_id)
                .await
                .map(|()| {
                    self.formatter
                        .format_notice(&format!("Deleted choice {}.", choice_id))
                }),
        };

        match result {
            Ok(body) => Ok(Response::success(body)),
            Err(e) if e.is_not_found() => Ok(Response::not_found(
                self.formatter.format_error(&e.to_string()),
            )),
            Err(AdminError::Validation(e)) => Ok(Response::rejected(
                self.formatter.format_error(&e.to_string()),
            )),
            Err(e) => Err(e.into()),
        }
    }

    fn question_not_found(&self, id: QuestionId) -> Response {
        Response::not_found(
            self.formatter
                .format_error(&format!("No poll with id {}.", id)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pollster_application::NoAuditLogger;
    use pollster_infrastructure::InMemoryPollStore;
    use pollster_presentation::{ConsoleFormatter, JsonFormatter, PublishedArg};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap()
    }

    fn app_with(formatter: Box<dyn PollFormatter>) -> App {
        App::new(
            Arc::new(InMemoryPollStore::new()),
            ListingParams::default(),
            Arc::new(NoAuditLogger),
            formatter,
        )
    }

    fn app() -> App {
        app_with(Box::new(ConsoleFormatter))
    }

    async fn add(app: &App, text: &str, days: i64, choices: &[&str]) -> Response {
        app.handle(
            Command::Admin {
                command: AdminCommand::AddQuestion {
                    text: text.to_string(),
                    published_at: None,
                    days: Some(days),
                    choice: choices.iter().map(|c| c.to_string()).collect(),
                },
            },
            now(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_empty_index() {
        let response = app().handle(Command::Index, now()).await.unwrap();
        assert_eq!(response.status, Status::Success);
        assert!(response.body.contains("No polls are available."));
    }

    #[tokio::test]
    async fn test_future_question_is_not_found() {
        let app = app();
        add(&app, "Later?", 30, &["Yes"]).await;

        let response = app
            .handle(
                Command::Detail {
                    question_id: QuestionId::new(1),
                },
                now(),
            )
            .await
            .unwrap();
        assert_eq!(response.status, Status::NotFound);
    }

    #[tokio::test]
    async fn test_vote_then_results() {
        let app = app();
        add(&app, "What's up?", -1, &["Not much", "The sky"]).await;

        let response = app
            .handle(
                Command::Vote {
                    question_id: QuestionId::new(1),
                    choice: Some("2".to_string()),
                },
                now(),
            )
            .await
            .unwrap();
        assert_eq!(response.status, Status::Success);
        assert!(response.body.contains("1 vote"));
    }

    #[tokio::test]
    async fn test_vote_without_choice_redisplays_detail() {
        let app = app();
        add(&app, "What's up?", -1, &["Not much"]).await;

        let response = app
            .handle(
                Command::Vote {
                    question_id: QuestionId::new(1),
                    choice: None,
                },
                now(),
            )
            .await
            .unwrap();
        assert_eq!(response.status, Status::Rejected);
        assert!(response.body.contains("You didn't select a choice."));
        assert!(response.body.contains("Not much"));
    }

    #[tokio::test]
    async fn test_admin_validation_is_rejected() {
        let app = app();
        let response = add(&app, "   ", 0, &[]).await;
        assert_eq!(response.status, Status::Rejected);
    }

    #[tokio::test]
    async fn test_admin_delete_missing_choice_is_not_found() {
        let response = app()
            .handle(
                Command::Admin {
                    command: AdminCommand::DeleteChoice {
                        choice_id: pollster_domain::ChoiceId::new(9),
                    },
                },
                now(),
            )
            .await
            .unwrap();
        assert_eq!(response.status, Status::NotFound);
    }

    #[tokio::test]
    async fn test_admin_list_includes_future_questions_as_json() {
        let app = app_with(Box::new(JsonFormatter));
        add(&app, "Now?", 0, &[]).await;
        add(&app, "Later?", 3, &[]).await;

        let response = app
            .handle(
                Command::Admin {
                    command: AdminCommand::List {
                        search: None,
                        published: PublishedArg::Any,
                    },
                },
                now(),
            )
            .await
            .unwrap();
        assert!(response.body.contains("Now?"));
        assert!(response.body.contains("Later?"));
    }
}
