//! Shared test fixtures

#![allow(dead_code)]

mod temp_tree;

pub use temp_tree::TempTree;

/// First file of the reference scenario: import block with two entries
pub const FILE1: &str = "package eventbus\n\nimport (\n\t\"x\"\n\t\"y\"\n)\n\nfunc F(){}\n";

/// Second file of the reference scenario: single-line import
pub const FILE2: &str = "package eventbus\n\nimport \"y\"\n\nfunc G(){}\n";

/// Expected merge of [`FILE1`] and [`FILE2`]
pub const MERGED_1_2: &str =
    "package eventbus\n\nimport (\n\t\"x\"\n\t\"y\"\n)\n\nfunc F(){}\n\nfunc G(){}\n";

/// Integration test file opening with build constraints and a package doc
pub const TAGGED_INTEGRATION: &str = "//go:build integration\n// +build integration\n\n// Package eventbus is exercised against a live NATS server.\npackage eventbus\n\nimport ( // live deps\n\t\"fmt\"\n)\n\nfunc G() {\n\tfmt.Println(\"live\")\n}\n";

/// A realistic Go test file with comments and inner blank lines
pub const NATS_UNIT: &str = r#"package eventbus

import (
	"context"
	"testing"

	// assertions
	"github.com/stretchr/testify/assert"
)

// TestNatsConnect checks the happy path.
func TestNatsConnect(t *testing.T) {
	ctx := context.Background()

	assert.NotNil(t, ctx)
}


"#;

/// Another test file sharing some imports with [`NATS_UNIT`]
pub const NATS_PERSISTENCE: &str = r#"

package eventbus

import (
	"testing"
	"time"

	"github.com/stretchr/testify/assert"
)

func TestNatsPersistence(t *testing.T) {
	assert.True(t, time.Now().After(time.Time{}))
}
"#;
