/// 联邦相关的运行时设置
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait FederationSettings: Send + Sync {
    /// 输入状态同步的全局开关
    fn is_typing_indicator_enabled(&self) -> bool;

    /// 本地 homeserver 域名，用于限定外部 ID
    fn home_server_domain(&self) -> String;
}
