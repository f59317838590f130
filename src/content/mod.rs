//! Editable site copy.
//!
//! A fixed catalogue of keys, each with a built-in default. Stored rows
//! override the defaults; anything missing or empty falls back.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::db::{Database, SiteContentRepository};
use crate::Result;

/// Merged view of every content key.
pub type Content = BTreeMap<String, String>;

/// Built-in copy, keyed by content key.
pub const DEFAULT_CONTENT: &[(&str, &str)] = &[
    ("botName", "vedoyh"),
    ("botTagline", "Verificação e Segurança"),
    ("botAvatarUrl", "/bot-avatar.png"),
    ("heroTitle", "vedoyh"),
    ("heroSubtitle", "Verificação e Segurança"),
    (
        "heroDescription",
        "Bot público para Discord de nova geração com verificação via captcha, desenvolvido com Components V2 para máxima segurança e performance.",
    ),
    ("feature1Title", "Verificação via Captcha"),
    (
        "feature1Description",
        "Sistema de verificação inteligente com captcha para proteger seu servidor contra bots e raids.",
    ),
    ("feature2Title", "Components V2"),
    (
        "feature2Description",
        "Interface moderna utilizando os novos Discord Components V2 para melhor experiência.",
    ),
    ("feature3Title", "Alta Performance"),
    (
        "feature3Description",
        "Desenvolvido com foco em velocidade e eficiência para servidores de qualquer tamanho.",
    ),
    ("feature4Title", "Fácil Configuração"),
    (
        "feature4Description",
        "Configure em minutos com comandos simples e intuitivos.",
    ),
    ("addBotUrl", "https://add.vdyh.lat"),
    ("supportUrl", "https://disc.vdyh.lat"),
    ("discordInvite", "https://disc.vdyh.lat"),
    ("termsUrl", "/termos"),
    ("privacyUrl", "/termos"),
    ("footerText", "© 2026 vedoyh. Todos os direitos reservados."),
    ("creatorName", "hyo"),
    ("creatorUrl", "https://discord.com/users/oyh1"),
    ("metaTitle", "vedoyh — Bot de Verificação e Segurança"),
    (
        "metaDescription",
        "Bot público para Discord com verificação via captcha e Components V2.",
    ),
    ("ogImage", "/og-image.png"),
];

/// Whether `key` is part of the catalogue.
pub fn is_known_key(key: &str) -> bool {
    DEFAULT_CONTENT.iter().any(|(k, _)| *k == key)
}

/// The defaults as a map.
pub fn default_content() -> Content {
    DEFAULT_CONTENT
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Reads and writes site copy.
#[derive(Clone)]
pub struct ContentService {
    db: Database,
}

impl ContentService {
    /// Create a service over `db`.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Stored values overlaid on the defaults.
    pub async fn load(&self) -> Result<Content> {
        let rows = SiteContentRepository::new(self.db.pool()).list().await?;
        let mut content = default_content();
        for row in rows {
            if row.value.is_empty() {
                continue;
            }
            if let Some(slot) = content.get_mut(&row.key) {
                *slot = row.value;
            }
        }
        Ok(content)
    }

    /// Like [`load`](Self::load), but falls back to the defaults on error.
    pub async fn load_or_default(&self) -> Content {
        match self.load().await {
            Ok(content) => content,
            Err(e) => {
                warn!(error = %e, "Failed to load site content; serving defaults");
                default_content()
            }
        }
    }

    /// Store every known key with a non-empty value.
    ///
    /// Returns the number of keys written.
    pub async fn update(&self, changes: &BTreeMap<String, String>) -> Result<usize> {
        let repo = SiteContentRepository::new(self.db.pool());
        let mut written = 0;
        for (key, value) in changes {
            if value.is_empty() {
                continue;
            }
            if !is_known_key(key) {
                debug!(key = %key, "Ignoring unknown content key");
                continue;
            }
            repo.upsert(key, value).await?;
            written += 1;
        }
        Ok(written)
    }
}
