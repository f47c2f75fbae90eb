// Localized strings for English and Chinese

#[derive(Clone, Debug)]
pub struct Assets {
    pub win_message: &'static str,
    pub loss_message: &'static str,
    pub quit_message: &'static str,
    pub help_line: &'static str,
    pub status_mines_fmt: &'static str, // "Mines left: {}"
}

/// Returns English language assets
pub fn english_assets() -> Assets {
    Assets {
        win_message: "YOU WIN!",
        loss_message: "BOOM! You hit a mine.",
        quit_message: "Game abandoned.",
        help_line: "W/A/S/D move   F flag   R reveal   Q/Esc quit",
        status_mines_fmt: "Mines left: {}",
    }
}

/// Returns Chinese language assets
pub fn chinese_assets() -> Assets {
    Assets {
        win_message: "你赢了！",
        loss_message: "轰！你踩到地雷了。",
        quit_message: "游戏已放弃。",
        help_line: "W/A/S/D 移动   F 标记   R 翻开   Q/Esc 退出",
        status_mines_fmt: "剩余地雷：{}",
    }
}

/// Language resources selected by code ("en" or "zh")
#[derive(Clone, Debug)]
pub struct Lang {
    pub current_lang: String,
    pub assets: Assets,
}

impl Lang {
    /// Unknown codes fall back to English
    pub fn new(lang_code: &str) -> Self {
        let code = if lang_code.to_lowercase().starts_with("zh") {
            "zh"
        } else {
            "en"
        };
        Lang {
            current_lang: code.to_string(),
            assets: if code == "zh" {
                chinese_assets()
            } else {
                english_assets()
            },
        }
    }

    pub fn is_cjk(&self) -> bool {
        self.current_lang == "zh"
    }

    pub fn status_mines(&self, remaining: isize) -> String {
        self.assets.status_mines_fmt.replace("{}", &remaining.to_string())
    }
}
