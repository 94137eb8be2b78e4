//! Global CSS styles for CoinPulse.
//!
//! Dark terminal palette: green for rising prices, red for falling ones.

pub const GLOBAL_STYLES: &str = r#"
/* === CSS Custom Properties === */
:root {
  /* Backgrounds */
  --void-black: #0a0a0a;
  --void-lighter: #111416;
  --void-border: #1f2326;

  /* Market colors */
  --up: #39d98a;
  --down: #ff3366;

  /* Accents */
  --cyan: #00d4aa;
  --cyan-glow: rgba(0, 212, 170, 0.3);
  --gold: #d4af37;

  /* Text */
  --text-primary: #f5f5f5;
  --text-secondary: rgba(245, 245, 245, 0.7);
  --text-muted: rgba(245, 245, 245, 0.5);

  /* Typography */
  --font-sans: 'Inter', -apple-system, 'Segoe UI', sans-serif;
  --font-mono: 'JetBrains Mono', 'SF Mono', 'Consolas', monospace;

  --text-xs: 0.75rem;
  --text-sm: 0.875rem;
  --text-base: 1rem;
  --text-lg: 1.125rem;
  --text-xl: 1.5rem;

  --transition-fast: 150ms ease;
}

/* === Global Reset === */
*, *::before, *::after {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  background: var(--void-black);
  color: var(--text-primary);
  font-family: var(--font-sans);
  font-size: var(--text-base);
  line-height: 1.5;
}

/* === Shell === */
.app-shell {
  min-height: 100vh;
  display: flex;
  flex-direction: column;
}

.app-header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  padding: 1rem 2rem;
  border-bottom: 1px solid var(--void-border);
  background: var(--void-lighter);
}

.app-title {
  font-size: var(--text-xl);
  color: var(--gold);
  letter-spacing: 0.05em;
}

.app-header-right {
  display: flex;
  align-items: center;
  gap: 0.75rem;
}

.status-dot {
  width: 10px;
  height: 10px;
  border-radius: 50%;
  background: var(--text-muted);
}

.status-online { background: var(--up); box-shadow: 0 0 8px var(--up); }
.status-offline { background: var(--down); box-shadow: 0 0 8px var(--down); }

.status-text {
  font-family: var(--font-mono);
  font-size: var(--text-sm);
  color: var(--text-secondary);
}

.app-main {
  flex: 1;
  padding: 2rem;
}

.page-title {
  font-size: var(--text-xl);
  margin-bottom: 0.5rem;
}

.body-text { color: var(--text-secondary); }
.loading, .empty-state { color: var(--text-muted); margin-top: 2rem; text-align: center; }
.error-text { color: var(--down); margin-top: 1rem; font-size: var(--text-sm); }

/* === Controls === */
.text-input {
  background: var(--void-black);
  border: 1px solid var(--void-border);
  border-radius: 6px;
  color: var(--text-primary);
  font-family: var(--font-mono);
  padding: 0.6rem 0.8rem;
  outline: none;
  transition: border-color var(--transition-fast);
}

.text-input:focus { border-color: var(--cyan); }

.btn-primary, .btn-secondary {
  border-radius: 6px;
  cursor: pointer;
  font-size: var(--text-sm);
  padding: 0.6rem 1.2rem;
  transition: all var(--transition-fast);
}

.btn-primary {
  background: var(--cyan);
  border: 1px solid var(--cyan);
  color: var(--void-black);
}

.btn-primary:hover:not(:disabled) { box-shadow: 0 0 12px var(--cyan-glow); }
.btn-primary:disabled { opacity: 0.4; cursor: not-allowed; }

.btn-secondary {
  background: transparent;
  border: 1px solid var(--void-border);
  color: var(--text-secondary);
}

.btn-secondary:hover { border-color: var(--cyan); color: var(--cyan); }

/* === Login === */
.login-page {
  max-width: 420px;
  margin: 4rem auto;
  display: flex;
  flex-direction: column;
  gap: 1rem;
}

.login-form { display: flex; gap: 0.5rem; }
.login-form .text-input { flex: 1; }

.login-divider {
  text-align: center;
  color: var(--text-muted);
  font-size: var(--text-sm);
}

/* === Dashboard === */
.dashboard-toolbar {
  display: flex;
  align-items: center;
  gap: 1rem;
  margin-bottom: 1.5rem;
}

.search-input { width: 280px; }

.updated-at {
  margin-left: auto;
  font-family: var(--font-mono);
  font-size: var(--text-xs);
  color: var(--text-muted);
}

.coin-table { display: flex; flex-direction: column; }

.coin-row {
  display: grid;
  grid-template-columns: 2.5fr 1fr 1.5fr 0.8fr 2fr;
  align-items: center;
  gap: 1rem;
  padding: 0.75rem 1rem;
  border-bottom: 1px solid var(--void-border);
  cursor: pointer;
  transition: background var(--transition-fast);
}

.coin-row:hover { background: var(--void-lighter); }
.coin-row-selected { background: var(--void-lighter); border-left: 2px solid var(--cyan); }

.coin-identity { display: flex; align-items: center; gap: 0.75rem; }
.coin-image { width: 28px; height: 28px; }
.coin-symbol { color: var(--text-muted); font-family: var(--font-mono); font-size: var(--text-sm); }
.coin-price, .coin-volume, .coin-market-cap { font-family: var(--font-mono); font-size: var(--text-sm); }
.coin-change { font-family: var(--font-mono); font-size: var(--text-sm); }
.coin-change-up { color: var(--up); }
.coin-change-down { color: var(--down); }

/* === Chatbot === */
.chatbot {
  position: fixed;
  right: 2rem;
  bottom: 2rem;
  display: flex;
  flex-direction: column;
  align-items: flex-end;
  gap: 0.75rem;
}

.chatbot-toggle {
  width: 56px;
  height: 56px;
  border-radius: 50%;
  border: 1px solid var(--cyan);
  background: var(--void-lighter);
  color: var(--text-primary);
  font-size: var(--text-xl);
  cursor: pointer;
}

.chatbot-panel {
  width: 360px;
  height: 480px;
  display: flex;
  flex-direction: column;
  background: var(--void-lighter);
  border: 1px solid var(--void-border);
  border-radius: 10px;
  overflow: hidden;
}

.chatbot-header {
  display: flex;
  justify-content: space-between;
  padding: 0.75rem 1rem;
  border-bottom: 1px solid var(--void-border);
  color: var(--gold);
}

.chatbot-coin { color: var(--text-muted); font-size: var(--text-xs); font-family: var(--font-mono); }

.chatbot-messages {
  flex: 1;
  overflow-y: auto;
  padding: 1rem;
  display: flex;
  flex-direction: column;
  gap: 0.5rem;
}

.chat-message {
  max-width: 85%;
  padding: 0.5rem 0.75rem;
  border-radius: 8px;
  font-size: var(--text-sm);
  white-space: pre-wrap;
}

.chat-message-user { align-self: flex-end; background: var(--cyan); color: var(--void-black); }
.chat-message-assistant { align-self: flex-start; background: var(--void-black); border: 1px solid var(--void-border); }
.chat-thinking { color: var(--text-muted); font-style: italic; }

.chatbot-input {
  display: flex;
  gap: 0.5rem;
  padding: 0.75rem;
  border-top: 1px solid var(--void-border);
}

.chatbot-input .text-input { flex: 1; }

/* === Offline === */
.offline-page {
  display: flex;
  flex-direction: column;
  align-items: center;
  gap: 1rem;
  margin-top: 2rem;
}

.game {
  position: relative;
  height: 220px;
  margin-top: 1.5rem;
  overflow: hidden;
  border: 1px solid var(--void-border);
  border-radius: 8px;
  background: var(--void-lighter);
  outline: none;
  cursor: pointer;
}

.game-score {
  position: absolute;
  top: 0.5rem;
  right: 0.75rem;
  font-family: var(--font-mono);
  color: var(--gold);
}

.game-player { position: absolute; background: var(--cyan); border-radius: 4px; }
.game-obstacle { position: absolute; background: var(--down); }
.game-ground { position: absolute; left: 0; right: 0; bottom: 0; background: var(--void-border); }

.game-hint {
  position: absolute;
  top: 0.5rem;
  left: 0.75rem;
  font-size: var(--text-xs);
  color: var(--text-muted);
}

.game-over {
  position: absolute;
  inset: 0;
  display: flex;
  flex-direction: column;
  align-items: center;
  justify-content: center;
  gap: 0.5rem;
  background: rgba(10, 10, 10, 0.8);
}
"#;
