mod health_check;
