//! Template file contents
//!
//! Go sources of a tp-micro service. `${...}` markers are filled by the
//! placeholder substitution engine.

/// main.go template
pub const MAIN_GO: &str = r#"package main

import (
	micro "github.com/xiaoenai/tp-micro"
	"github.com/xiaoenai/tp-micro/discovery"

	"${import_prefix}/api"
	"${import_prefix}/logic/model"
)

func main() {
	if err := model.Init(cfg.Mysql, cfg.Mongo, cfg.Redis, cfg.CacheExpire); err != nil {
		panic(err)
	}
	srv := micro.NewServer(
		cfg.Srv,
		discovery.ServicePlugin(cfg.Srv.InnerIpPort(), cfg.Etcd),
	)
	api.Route("/${service_api_prefix}", srv.Router())
	srv.ListenAndServe()
}
"#;

/// config.go template
pub const CONFIG_GO: &str = r#"package main

import (
	"time"

	"github.com/henrylee2cn/cfgo"
	micro "github.com/xiaoenai/tp-micro"
	"github.com/xiaoenai/tp-micro/model/etcd"
	"github.com/xiaoenai/tp-micro/model/mongo"
	"github.com/xiaoenai/tp-micro/model/mysql"
	"github.com/xiaoenai/tp-micro/model/redis"
)

type config struct {
	Srv         micro.SrvConfig  `yaml:"srv"`
	Etcd        etcd.EasyConfig  `yaml:"etcd"`
	Mysql       *mysql.Config    `yaml:"mysql"`
	Mongo       *mongo.Config    `yaml:"mongo"`
	Redis       *redis.Config    `yaml:"redis"`
	CacheExpire time.Duration    `yaml:"cache_expire"`
}

// Reload Bi-directionally synchronize config between YAML file and memory.
func (c *config) Reload(bind cfgo.BindFunc) error {
	return bind()
}

var cfg = &config{
	Srv: micro.SrvConfig{
		ListenAddress:   ":9090",
		EnableHeartbeat: true,
		PrintDetail:     true,
		CountTime:       true,
	},
	Etcd: etcd.EasyConfig{
		Endpoints: []string{"http://127.0.0.1:2379"},
	},
	CacheExpire: time.Hour,
}

func init() {
	cfgo.MustReg("${service_api_prefix}", cfg)
}
"#;

/// .gitignore template
pub const GITIGNORE: &str = r#"# Binaries
*.exe
*.dll
*.so
*.dylib

# Test binary
*.test

# Output of the go coverage tool
*.out

# Logs
*.log
log/

# Local configuration
config/
"#;

/// args/const.go template
pub const ARGS_CONST_GO: &str = r"package args

// Custom constants live here.
";

/// args/var.go template
pub const ARGS_VAR_GO: &str = r"package args

// Custom variables live here.
";

/// args/type.go template
pub const ARGS_TYPE_GO: &str = r"package args

// Custom types live here.
";

/// args/const.gen.go template
pub const ARGS_CONST_GEN_GO: &str = r"package args
${const_list}
";

/// args/type.gen.go template
pub const ARGS_TYPE_GEN_GO: &str = r"package args

import (${import_list}
)
${type_define_list}
";

/// api/handler.go template
pub const API_HANDLER_GO: &str = r"package api

// Custom handlers live here.
";

/// api/router.go template
pub const API_ROUTER_GO: &str = r#"package api

import (
	tp "github.com/henrylee2cn/teleport"
)

// customRoute registers hand-written handlers.
func customRoute(_group *tp.SubRouter) {
	_ = _group
}
"#;

/// api/router.gen.go template
pub const API_ROUTER_GEN_GO: &str = r#"package api

import (
	tp "github.com/henrylee2cn/teleport"
)

// Route registers handlers to router.
func Route(_root string, _router *tp.Router) {
	// root router group
	_group := _router.SubRoute(_root)

	// custom router
	customRoute(_group)

	// automatically generated router${register_router_list}
}
"#;

/// api/pull_handler.gen.go template
pub const API_PULL_HANDLER_GEN_GO: &str = r#"package api

import (
	tp "github.com/henrylee2cn/teleport"

	"${import_prefix}/args"
	"${import_prefix}/logic"
)
${handler_api_define}
"#;

/// api/push_handler.gen.go template
pub const API_PUSH_HANDLER_GEN_GO: &str = r#"package api

import (
	tp "github.com/henrylee2cn/teleport"

	"${import_prefix}/args"
	"${import_prefix}/logic"
)
${handler_api_define}
"#;

/// logic/tmp_code.gen.go template
pub const LOGIC_TMP_CODE_GEN_GO: &str = r#"package logic

import (
	tp "github.com/henrylee2cn/teleport"

	"${import_prefix}/args"
)
${logic_api_define}
"#;

/// logic/model/init.go template
pub const LOGIC_MODEL_INIT_GO: &str = r#"// Package model is the data access layer of ${import_prefix}.
package model

import (
	"time"

	"github.com/xiaoenai/tp-micro/model/mongo"
	"github.com/xiaoenai/tp-micro/model/mysql"
	"github.com/xiaoenai/tp-micro/model/redis"
)

var (
	mysqlHandler *mysql.DB
	mongoHandler *mongo.DB
	cacheExpire  time.Duration
	initerList   []func() error
)

// Init initializes the model layer.
func Init(mysqlConfig *mysql.Config, mongoConfig *mongo.Config, redisConfig *redis.Config, expire time.Duration) (err error) {
	cacheExpire = expire
	if mysqlConfig != nil {
		mysqlHandler, err = mysql.Connect(mysqlConfig, redisConfig)
		if err != nil {
			return err
		}
	}
	if mongoConfig != nil {
		mongoHandler, err = mongo.Connect(mongoConfig, redisConfig)
		if err != nil {
			return err
		}
	}
	for _, fn := range initerList {
		if err = fn(); err != nil {
			return err
		}
	}
	return nil
}

// GetMysqlDB returns the mysql DB handler.
func GetMysqlDB() *mysql.DB {
	return mysqlHandler
}

// GetMongoDB returns the mongo DB handler.
func GetMongoDB() *mongo.DB {
	return mongoHandler
}
"#;

/// sdk/rpc.go template
pub const SDK_RPC_GO: &str = r#"package sdk

import (
	micro "github.com/xiaoenai/tp-micro"
	"github.com/xiaoenai/tp-micro/discovery"
	"github.com/xiaoenai/tp-micro/model/etcd"
)

var client *micro.Client

// Init initializes client with configs.
func Init(cliConfig micro.CliConfig, etcdConfing etcd.EasyConfig) {
	client = micro.NewClient(
		cliConfig,
		discovery.NewLinker(etcdConfing),
	)
}

// InitWithClient initializes client with specified object.
func InitWithClient(cli *micro.Client) {
	client = cli
}
"#;

/// sdk/rpc_test.go template
pub const SDK_RPC_TEST_GO: &str = r"package sdk

// Custom tests live here.
";

/// sdk/rpc.gen.go template
pub const SDK_RPC_GEN_GO: &str = r#"package sdk

import (
	tp "github.com/henrylee2cn/teleport"
	"github.com/henrylee2cn/teleport/socket"

	"${import_prefix}/args"
)
${rpc_call_define}
"#;

/// sdk/rpc.gen_test.go template
pub const SDK_RPC_GEN_TEST_GO: &str = r#"package sdk

import (
	"testing"

	tp "github.com/henrylee2cn/teleport"
	micro "github.com/xiaoenai/tp-micro"
	"github.com/xiaoenai/tp-micro/model/etcd"

	"${import_prefix}/args"
)

func TestSdk(t *testing.T) {
	Init(
		micro.CliConfig{
			Failover:        3,
			HeartbeatSecond: 4,
		},
		etcd.EasyConfig{
			Endpoints: []string{"http://127.0.0.1:2379"},
		},
	)
${rpc_call_test_define}
}
"#;

/// README.md template
pub const README_MD: &str = r"# ${PROJ_NAME}

${readme}

<br>

*This is a project created by `micro gen` command.*

*[About Micro Command](https://github.com/xiaoenai/tp-micro/tree/master/cmd/micro)*
";
