// ==========================================
// IPO 同步触发工具 - 工作卡号输入
// ==========================================
// 来源优先级: 环境变量 TRIGGER_IPO_SYNC_AK_NUM → 交互式提示
// 提示仅在环境变量未设置（或为空白）时出现
// ==========================================

use crate::config::env_keys;
use crate::domain::{AkNumber, InvalidAkNumber};
use thiserror::Error;

/// 交互式提示文本
pub const PROMPT_TEXT: &str = "Bitte die Arbeitskartennummer eingeben";

/// 输入错误
#[derive(Error, Debug)]
pub enum InputError {
    #[error("读取工作卡号失败: {0}")]
    Prompt(String),

    #[error(transparent)]
    Invalid(#[from] InvalidAkNumber),
}

/// 交互式提示
pub trait Prompt {
    fn ask(&mut self, text: &str) -> Result<String, InputError>;
}

/// 基于 dialoguer 的终端提示
#[derive(Debug, Default)]
pub struct DialoguerPrompt;

impl Prompt for DialoguerPrompt {
    fn ask(&mut self, text: &str) -> Result<String, InputError> {
        dialoguer::Input::<String>::new()
            .with_prompt(text)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| InputError::Prompt(e.to_string()))
    }
}

/// 工作卡号来源
pub trait AkNumberSource {
    /// 解析一次工作卡号
    fn resolve(&mut self) -> Result<AkNumber, InputError>;
}

// ==========================================
// EnvOrPrompt - 环境变量优先，缺省时提示
// ==========================================
pub struct EnvOrPrompt<P: Prompt> {
    env_value: Option<String>,
    prompt: P,
}

impl<P: Prompt> EnvOrPrompt<P> {
    pub fn new(env_value: Option<String>, prompt: P) -> Self {
        Self { env_value, prompt }
    }

    /// 从 TRIGGER_IPO_SYNC_AK_NUM 读取
    pub fn from_env(prompt: P) -> Self {
        Self::new(std::env::var(env_keys::AK_NUM).ok(), prompt)
    }
}

impl<P: Prompt> AkNumberSource for EnvOrPrompt<P> {
    fn resolve(&mut self) -> Result<AkNumber, InputError> {
        if let Some(raw) = self.env_value.as_deref().filter(|v| !v.trim().is_empty()) {
            tracing::debug!(source = "env", "工作卡号来自环境变量");
            return Ok(AkNumber::parse(raw)?);
        }

        tracing::debug!(source = "prompt", "环境变量未设置，提示输入工作卡号");
        let answer = self.prompt.ask(PROMPT_TEXT)?;
        Ok(AkNumber::parse(&answer)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 记录提示次数的假提示
    struct ScriptedPrompt {
        answer: Result<String, String>,
        asked: usize,
    }

    impl ScriptedPrompt {
        fn answering(answer: &str) -> Self {
            Self {
                answer: Ok(answer.to_string()),
                asked: 0,
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                answer: Err(message.to_string()),
                asked: 0,
            }
        }
    }

    impl Prompt for ScriptedPrompt {
        fn ask(&mut self, text: &str) -> Result<String, InputError> {
            assert_eq!(text, PROMPT_TEXT);
            self.asked += 1;
            self.answer.clone().map_err(InputError::Prompt)
        }
    }

    #[test]
    fn test_env_value_wins_without_prompt() {
        let mut source = EnvOrPrompt::new(
            Some("AK-1001".to_string()),
            ScriptedPrompt::answering("AK-9999"),
        );

        assert_eq!(source.resolve().unwrap().as_str(), "AK-1001");
        assert_eq!(source.prompt.asked, 0);
    }

    #[test]
    fn test_prompt_when_env_unset() {
        let mut source = EnvOrPrompt::new(None, ScriptedPrompt::answering(" AK-2002 "));

        assert_eq!(source.resolve().unwrap().as_str(), "AK-2002");
        assert_eq!(source.prompt.asked, 1);
    }

    #[test]
    fn test_prompt_when_env_blank() {
        let mut source = EnvOrPrompt::new(
            Some("  ".to_string()),
            ScriptedPrompt::answering("AK-3003"),
        );

        assert_eq!(source.resolve().unwrap().as_str(), "AK-3003");
        assert_eq!(source.prompt.asked, 1);
    }

    #[test]
    fn test_empty_answer_is_invalid() {
        let mut source = EnvOrPrompt::new(None, ScriptedPrompt::answering(""));

        assert!(matches!(
            source.resolve(),
            Err(InputError::Invalid(InvalidAkNumber))
        ));
    }

    #[test]
    fn test_prompt_failure_propagates() {
        let mut source = EnvOrPrompt::new(None, ScriptedPrompt::failing("not a terminal"));

        let err = source.resolve().unwrap_err();
        assert!(matches!(err, InputError::Prompt(ref msg) if msg == "not a terminal"));
    }
}
