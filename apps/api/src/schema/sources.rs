use crate::extraction::ArrayMode::{Objects, Strings};
use crate::schema::{ArrayField, ScalarField, SchemaAdapter, SourceKind};

const fn scalar(key: &'static str) -> ScalarField {
    ScalarField { key, label: key }
}

const fn relabel(key: &'static str, label: &'static str) -> ScalarField {
    ScalarField { key, label }
}

const fn strings(key: &'static str) -> ArrayField {
    ArrayField {
        key,
        label: key,
        mode: Strings,
    }
}

const fn objects(key: &'static str) -> ArrayField {
    ArrayField {
        key,
        label: key,
        mode: Objects,
    }
}

// ── Resume upload ───────────────────────────────────────────────────────────

pub static RESUME: SchemaAdapter = SchemaAdapter {
    source: SourceKind::Resume,
    scalars: &[
        scalar("name"),
        scalar("email"),
        relabel("telephone", "phone"),
        scalar("location"),
        scalar("summary"),
        scalar("website"),
    ],
    arrays: &[
        strings("skills"),
        objects("experience"),
        objects("education"),
        objects("projects"),
        strings("certifications"),
        strings("languages"),
    ],
};

// ── GitHub import ───────────────────────────────────────────────────────────

pub static GITHUB: SchemaAdapter = SchemaAdapter {
    source: SourceKind::Github,
    scalars: &[
        relabel("login", "username"),
        scalar("name"),
        scalar("bio"),
        scalar("location"),
        scalar("company"),
        relabel("blog", "website"),
    ],
    arrays: &[
        strings("languages"),
        strings("skills"),
        objects("repositories"),
        objects("contributions"),
    ],
};

// ── LinkedIn import ─────────────────────────────────────────────────────────

pub static LINKEDIN: SchemaAdapter = SchemaAdapter {
    source: SourceKind::Linkedin,
    scalars: &[
        scalar("name"),
        scalar("headline"),
        scalar("location"),
        scalar("summary"),
        scalar("industry"),
    ],
    arrays: &[
        objects("experience"),
        objects("education"),
        strings("skills"),
        strings("certifications"),
    ],
};

// ── Project document upload ─────────────────────────────────────────────────

pub static PROJECT: SchemaAdapter = SchemaAdapter {
    source: SourceKind::Project,
    scalars: &[
        scalar("title"),
        scalar("description"),
        scalar("role"),
        scalar("duration"),
        scalar("url"),
    ],
    arrays: &[
        strings("technologies"),
        strings("highlights"),
        strings("outcomes"),
        objects("collaborators"),
    ],
};

// ── Aggregate profile (all sources merged + preference prediction) ──────────

pub static AGGREGATE: SchemaAdapter = SchemaAdapter {
    source: SourceKind::Aggregate,
    scalars: &[
        scalar("name"),
        scalar("email"),
        relabel("telephone", "phone"),
        scalar("location"),
        scalar("headline"),
        scalar("summary"),
        scalar("desired_role"),
    ],
    arrays: &[
        strings("skills"),
        objects("experience"),
        objects("education"),
        objects("projects"),
        strings("preferred_locations"),
        strings("job_titles"),
    ],
};
