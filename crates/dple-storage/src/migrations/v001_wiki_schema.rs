//! V001: the wiki tables a page list selects from.
//! page, categorylinks, pagelinks, templatelinks, imagelinks, redirect,
//! revision, user.

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS page (
    page_id INTEGER PRIMARY KEY,
    page_namespace INTEGER NOT NULL,
    page_title TEXT NOT NULL,
    page_is_redirect INTEGER NOT NULL DEFAULT 0,
    page_len INTEGER NOT NULL DEFAULT 0,
    page_touched TEXT NOT NULL DEFAULT '',
    page_counter INTEGER NOT NULL DEFAULT 0,
    page_latest INTEGER NOT NULL DEFAULT 0,
    UNIQUE (page_namespace, page_title)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_page_len ON page(page_len);
CREATE INDEX IF NOT EXISTS idx_page_redirect_namespace_len
    ON page(page_is_redirect, page_namespace, page_len);

-- Sort keys carry an optional "|extra" annotation after the prefix.
CREATE TABLE IF NOT EXISTS categorylinks (
    cl_from INTEGER NOT NULL,
    cl_to TEXT NOT NULL,
    cl_sortkey TEXT NOT NULL DEFAULT '',
    cl_sortkey_prefix TEXT NOT NULL DEFAULT '',
    cl_timestamp TEXT NOT NULL,
    cl_type TEXT NOT NULL DEFAULT 'page',
    PRIMARY KEY (cl_from, cl_to)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_cl_sortkey ON categorylinks(cl_to, cl_type, cl_sortkey, cl_from);
CREATE INDEX IF NOT EXISTS idx_cl_timestamp ON categorylinks(cl_to, cl_timestamp);

CREATE TABLE IF NOT EXISTS pagelinks (
    pl_from INTEGER NOT NULL,
    pl_namespace INTEGER NOT NULL,
    pl_title TEXT NOT NULL,
    PRIMARY KEY (pl_from, pl_namespace, pl_title)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_pl_namespace ON pagelinks(pl_namespace, pl_title, pl_from);

CREATE TABLE IF NOT EXISTS templatelinks (
    tl_from INTEGER NOT NULL,
    tl_namespace INTEGER NOT NULL,
    tl_title TEXT NOT NULL,
    PRIMARY KEY (tl_from, tl_namespace, tl_title)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_tl_namespace ON templatelinks(tl_namespace, tl_title, tl_from);

CREATE TABLE IF NOT EXISTS imagelinks (
    il_from INTEGER NOT NULL,
    il_to TEXT NOT NULL,
    PRIMARY KEY (il_from, il_to)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_il_to ON imagelinks(il_to, il_from);

CREATE TABLE IF NOT EXISTS redirect (
    rd_from INTEGER PRIMARY KEY,
    rd_namespace INTEGER NOT NULL,
    rd_title TEXT NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_rd_ns_title ON redirect(rd_namespace, rd_title, rd_from);

CREATE TABLE IF NOT EXISTS revision (
    rev_id INTEGER PRIMARY KEY,
    rev_page INTEGER NOT NULL,
    rev_user INTEGER NOT NULL DEFAULT 0,
    rev_timestamp TEXT NOT NULL DEFAULT '',
    rev_parent_id INTEGER NOT NULL DEFAULT 0
) STRICT;

CREATE INDEX IF NOT EXISTS idx_rev_page ON revision(rev_page, rev_id);
CREATE INDEX IF NOT EXISTS idx_rev_user ON revision(rev_user, rev_page);

CREATE TABLE IF NOT EXISTS user (
    user_id INTEGER PRIMARY KEY,
    user_name TEXT NOT NULL UNIQUE
) STRICT;
"#;
