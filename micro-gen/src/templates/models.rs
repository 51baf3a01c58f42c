//! Handlebars templates for model files
//!
//! Rendered once per model with a `ModelContext`. Both styles receive the
//! same SQL fragments; the document style only surfaces them in doc comments.

/// Relational (`MySQL`) model template
pub const MYSQL_MODEL: &str = r#"package model

import (
	"database/sql"

	"github.com/xiaoenai/tp-micro/model/mysql"
	"github.com/xiaoenai/tp-micro/model/sqlx"

	"${import_prefix}/args"
)

{{doc}}type {{name}} = args.{{name}}

var {{lower_first_name}}DB *mysql.CacheableDB

func init() {
	initerList = append(initerList, func() (err error) {
		{{lower_first_name}}DB, err = mysqlHandler.RegCacheableDB(new({{name}}), cacheExpire, args.{{name}}Sql)
		return err
	})
}

// Get{{name}}DB returns the {{name}} DB handler.
func Get{{name}}DB() *mysql.CacheableDB {
	return {{lower_first_name}}DB
}

// Insert{{name}} inserts a {{name}} record into {{name_sql}}.
{{#if is_default_primary}}
// NOTE: the auto-increment id is written back into the record.
{{/if}}
func Insert{{name}}(_{{lower_first_letter}} *{{name}}, tx ...*sqlx.Tx) error {
	return {{lower_first_name}}DB.Callback(func(tx sqlx.DbOrTx) error {
		query := "INSERT INTO {{name_sql}} ({{insert_columns}}) VALUES ({{insert_placeholders}});"
{{#if is_default_primary}}
		r, err := tx.NamedExec(query, _{{lower_first_letter}})
		if err != nil {
			return err
		}
		_{{lower_first_letter}}.Id, err = r.LastInsertId()
		return err
{{else}}
		_, err := tx.NamedExec(query, _{{lower_first_letter}})
		return err
{{/if}}
	}, tx...)
}

// Upsert{{name}} inserts a {{name}} record, or updates it on duplicate key.
func Upsert{{name}}(_{{lower_first_letter}} *{{name}}, tx ...*sqlx.Tx) error {
	return {{lower_first_name}}DB.Callback(func(tx sqlx.DbOrTx) error {
		query := "INSERT INTO {{name_sql}} ({{insert_columns}}) VALUES ({{insert_placeholders}}) ON DUPLICATE KEY UPDATE {{upsert_assignments}}"
		_, err := tx.NamedExec(query, _{{lower_first_letter}})
		if err != nil {
			return err
		}
		return {{lower_first_name}}DB.DeleteCache(_{{lower_first_letter}})
	}, tx...)
}
{{#if primary_where}}

// Update{{name}}ByPrimary updates a {{name}} record by its primary key.
func Update{{name}}ByPrimary(_{{lower_first_letter}} *{{name}}, tx ...*sqlx.Tx) error {
	return {{lower_first_name}}DB.Callback(func(tx sqlx.DbOrTx) error {
		query := "UPDATE {{name_sql}} SET {{update_assignments}} WHERE {{primary_where}} LIMIT 1;"
		_, err := tx.NamedExec(query, _{{lower_first_letter}})
		if err != nil {
			return err
		}
		return {{lower_first_name}}DB.DeleteCache(_{{lower_first_letter}})
	}, tx...)
}

// Delete{{name}}ByPrimary deletes a {{name}} record by its primary key.
func Delete{{name}}ByPrimary(_{{lower_first_letter}} *{{name}}, tx ...*sqlx.Tx) error {
	return {{lower_first_name}}DB.Callback(func(tx sqlx.DbOrTx) error {
		query := "DELETE FROM {{name_sql}} WHERE {{primary_where}};"
		_, err := tx.NamedExec(query, _{{lower_first_letter}})
		if err != nil {
			return err
		}
		return {{lower_first_name}}DB.DeleteCache(_{{lower_first_letter}})
	}, tx...)
}
{{/if}}

// Get{{name}}ByPrimary fills a {{name}} record by its primary key.
// NOTE: false is returned when the record does not exist.
func Get{{name}}ByPrimary(_{{lower_first_letter}} *{{name}}) (bool, error) {
	err := {{lower_first_name}}DB.CacheGet(_{{lower_first_letter}})
	switch err {
	case nil:
		return true, nil
	case sql.ErrNoRows:
		return false, nil
	default:
		return false, err
	}
}
{{#each unique_fields}}

// Get{{@root.name}}By{{name}} queries a {{@root.name}} record by the unique column '{{column}}'.
func Get{{@root.name}}By{{name}}({{param}} {{type_tag}}) (*{{@root.name}}, bool, error) {
	var _{{@root.lower_first_letter}} = &{{@root.name}}{ {{name}}: {{param}} }
	err := {{@root.lower_first_name}}DB.CacheGet(_{{@root.lower_first_letter}}, "{{column}}")
	switch err {
	case nil:
		return _{{@root.lower_first_letter}}, true, nil
	case sql.ErrNoRows:
		return nil, false, nil
	default:
		return nil, false, err
	}
}
{{/each}}
"#;

/// Document (`MongoDB`) model template
pub const MONGO_MODEL: &str = r#"package model

import (
	"github.com/xiaoenai/tp-micro/model/mongo"
	"gopkg.in/mgo.v2"
	"gopkg.in/mgo.v2/bson"

	"${import_prefix}/args"
)

{{doc}}type {{name}} = args.{{name}}

// {{name}}Collection is the collection name of {{name}}.
const {{name}}Collection = "{{snake_name}}"

var {{lower_first_name}}DB *mongo.CacheableDB

func init() {
	initerList = append(initerList, func() (err error) {
		{{lower_first_name}}DB, err = mongoHandler.RegCacheableDB(new({{name}}), cacheExpire)
		return err
	})
}

// Get{{name}}DB returns the {{name}} DB handler.
func Get{{name}}DB() *mongo.CacheableDB {
	return {{lower_first_name}}DB
}

// Insert{{name}} inserts a {{name}} document.
// Fields: {{insert_columns}}
func Insert{{name}}(_{{lower_first_letter}} *{{name}}) error {
	return {{lower_first_name}}DB.WitchCollection(func(col *mgo.Collection) error {
		return col.Insert(_{{lower_first_letter}})
	})
}

// Upsert{{name}} inserts a {{name}} document, or updates the one matching selector.
// On conflict: {{upsert_assignments}}
func Upsert{{name}}(selector bson.M, _{{lower_first_letter}} *{{name}}) error {
	err := {{lower_first_name}}DB.WitchCollection(func(col *mgo.Collection) error {
		_, err := col.Upsert(selector, _{{lower_first_letter}})
		return err
	})
	if err != nil {
		return err
	}
	return {{lower_first_name}}DB.DeleteCache(_{{lower_first_letter}})
}
{{#if primary_where}}

// Update{{name}}ByPrimary updates a {{name}} document by its primary key.
// Fields: {{update_assignments}}
func Update{{name}}ByPrimary(_{{lower_first_letter}} *{{name}}) error {
	err := {{lower_first_name}}DB.WitchCollection(func(col *mgo.Collection) error {
		return col.Update(bson.M{ {{#each primary_fields}}"{{column}}": _{{@root.lower_first_letter}}.{{name}}, {{/each}} }, _{{lower_first_letter}})
	})
	if err != nil {
		return err
	}
	return {{lower_first_name}}DB.DeleteCache(_{{lower_first_letter}})
}

// Delete{{name}}ByPrimary deletes a {{name}} document by its primary key.
func Delete{{name}}ByPrimary(_{{lower_first_letter}} *{{name}}) error {
	err := {{lower_first_name}}DB.WitchCollection(func(col *mgo.Collection) error {
		return col.Remove(bson.M{ {{#each primary_fields}}"{{column}}": _{{@root.lower_first_letter}}.{{name}}, {{/each}} })
	})
	if err != nil {
		return err
	}
	return {{lower_first_name}}DB.DeleteCache(_{{lower_first_letter}})
}
{{/if}}

// Get{{name}}ByPrimary fills a {{name}} document by its primary key.
// NOTE: false is returned when the document does not exist.
func Get{{name}}ByPrimary(_{{lower_first_letter}} *{{name}}) (bool, error) {
	err := {{lower_first_name}}DB.CacheGet(_{{lower_first_letter}})
	switch err {
	case nil:
		return true, nil
	case mgo.ErrNotFound:
		return false, nil
	default:
		return false, err
	}
}
{{#each unique_fields}}

// Get{{@root.name}}By{{name}} queries a {{@root.name}} document by the unique field '{{column}}'.
func Get{{@root.name}}By{{name}}({{param}} {{type_tag}}) (*{{@root.name}}, bool, error) {
	var _{{@root.lower_first_letter}} = &{{@root.name}}{ {{name}}: {{param}} }
	err := {{@root.lower_first_name}}DB.CacheGet(_{{@root.lower_first_letter}}, "{{column}}")
	switch err {
	case nil:
		return _{{@root.lower_first_letter}}, true, nil
	case mgo.ErrNotFound:
		return nil, false, nil
	default:
		return nil, false, err
	}
}
{{/each}}
"#;
