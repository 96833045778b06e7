use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::errors::AppError;
use crate::tools::bmi::BmiTool;
use crate::tools::collaborators::{
    BackgroundEraserTool, MemeCreatorTool, QrGeneratorTool, VideoDownloaderTool,
};
use crate::tools::expenses::ExpensesTool;
use crate::tools::health_journal::HealthJournalTool;
use crate::tools::pdf_tools::PdfToolsTool;
use crate::tools::photo_enhancer::PhotoEnhancerTool;
use crate::tools::quick_notes::QuickNotesTool;
use crate::tools::resume_builder::ResumeBuilderTool;
use crate::tools::weather::{WeatherClient, WeatherTool};
use crate::tools::{Availability, Suite, ToolHandler, ToolKind};

#[derive(Debug, Serialize)]
pub struct ToolListing {
    pub tool: ToolKind,
    pub label: &'static str,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SuiteListing {
    pub suite: Suite,
    pub label: &'static str,
    pub caption: &'static str,
    pub tools: Vec<ToolListing>,
}

/// Maps every `ToolKind` to its handler.
pub struct ToolRegistry {
    handlers: HashMap<ToolKind, Arc<dyn ToolHandler>>,
}

impl ToolRegistry {
    /// Builds the standard tool set. Collaborator-backed tools start without a collaborator.
    pub fn from_config(config: &Config) -> Result<Self> {
        let weather_client = match &config.weather_api_key {
            Some(key) => Some(
                WeatherClient::new(key.clone(), config.weather_api_url.clone())
                    .context("Failed to build weather HTTP client")?,
            ),
            None => None,
        };

        let handlers: Vec<Arc<dyn ToolHandler>> = vec![
            Arc::new(PhotoEnhancerTool),
            Arc::new(BackgroundEraserTool::new(None)),
            Arc::new(MemeCreatorTool::new(None)),
            Arc::new(VideoDownloaderTool::new(None)),
            Arc::new(WeatherTool::new(weather_client)),
            Arc::new(ExpensesTool),
            Arc::new(BmiTool),
            Arc::new(HealthJournalTool),
            Arc::new(QrGeneratorTool::new(None)),
            Arc::new(PdfToolsTool),
            Arc::new(ResumeBuilderTool::new(config.page_config())),
            Arc::new(QuickNotesTool),
        ];
        Ok(Self::with_handlers(handlers))
    }

    pub fn with_handlers(handlers: Vec<Arc<dyn ToolHandler>>) -> Self {
        Self {
            handlers: handlers.into_iter().map(|h| (h.kind(), h)).collect(),
        }
    }

    /// The handler for `kind`, if it is registered and ready.
    pub fn get(&self, kind: ToolKind) -> Result<Arc<dyn ToolHandler>, AppError> {
        let handler = self
            .handlers
            .get(&kind)
            .ok_or_else(|| AppError::NotFound(format!("Tool '{}' is not registered", kind.slug())))?;
        match handler.availability() {
            Availability::Ready => Ok(handler.clone()),
            Availability::Unavailable(reason) => Err(AppError::ToolUnavailable(format!(
                "{} is unavailable: {reason}",
                kind.label()
            ))),
        }
    }

    pub fn catalogue(&self) -> Vec<SuiteListing> {
        Suite::ALL
            .iter()
            .map(|suite| SuiteListing {
                suite: *suite,
                label: suite.label(),
                caption: suite.caption(),
                tools: suite
                    .tools()
                    .iter()
                    .map(|kind| {
                        let availability = self
                            .handlers
                            .get(kind)
                            .map(|h| h.availability())
                            .unwrap_or_else(|| Availability::Unavailable("not registered".to_string()));
                        let reason = match availability {
                            Availability::Ready => None,
                            Availability::Unavailable(reason) => Some(reason),
                        };
                        ToolListing {
                            tool: *kind,
                            label: kind.label(),
                            available: reason.is_none(),
                            reason,
                        }
                    })
                    .collect(),
            })
            .collect()
    }

    /// Logs one line per tool at startup.
    pub fn log_availability(&self) {
        for suite in self.catalogue() {
            for listing in suite.tools {
                match listing.reason {
                    None => info!(suite = suite.label, tool = listing.tool.slug(), "Tool ready"),
                    Some(reason) => warn!(
                        suite = suite.label,
                        tool = listing.tool.slug(),
                        %reason,
                        "Tool unavailable"
                    ),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing<'a>(catalogue: &'a [SuiteListing], kind: ToolKind) -> &'a ToolListing {
        catalogue
            .iter()
            .flat_map(|s| s.tools.iter())
            .find(|t| t.tool == kind)
            .unwrap()
    }

    #[test]
    fn test_default_registry_covers_every_tool() {
        let registry = ToolRegistry::from_config(&Config::default()).unwrap();
        let catalogue = registry.catalogue();
        assert_eq!(catalogue.len(), 3);
        assert_eq!(catalogue.iter().map(|s| s.tools.len()).sum::<usize>(), 12);
        assert_eq!(catalogue[0].label, "Media Studio");
        assert_eq!(catalogue[2].caption, "PRODUCTIVITY");
    }

    #[test]
    fn test_availability_with_default_config() {
        let registry = ToolRegistry::from_config(&Config::default()).unwrap();
        let catalogue = registry.catalogue();

        for kind in [
            ToolKind::BackgroundEraser,
            ToolKind::MemeCreator,
            ToolKind::VideoDownloader,
            ToolKind::QrGenerator,
            ToolKind::Weather,
        ] {
            let entry = listing(&catalogue, kind);
            assert!(!entry.available, "{kind:?}");
            assert!(entry.reason.is_some());
        }
        for kind in [
            ToolKind::ResumeBuilder,
            ToolKind::PhotoEnhancer,
            ToolKind::PdfTools,
            ToolKind::Expenses,
        ] {
            assert!(listing(&catalogue, kind).available, "{kind:?}");
        }
    }

    #[test]
    fn test_weather_becomes_available_with_key() {
        let config = Config {
            weather_api_key: Some("key".to_string()),
            ..Config::default()
        };
        let registry = ToolRegistry::from_config(&config).unwrap();
        assert!(registry.get(ToolKind::Weather).is_ok());
    }

    #[test]
    fn test_get_refuses_unavailable_and_unregistered_tools() {
        let registry = ToolRegistry::from_config(&Config::default()).unwrap();
        assert!(matches!(
            registry.get(ToolKind::QrGenerator),
            Err(AppError::ToolUnavailable(_))
        ));

        let sparse = ToolRegistry::with_handlers(vec![Arc::new(BmiTool)]);
        assert!(sparse.get(ToolKind::BmiCalculator).is_ok());
        assert!(matches!(sparse.get(ToolKind::Expenses), Err(AppError::NotFound(_))));
    }
}
